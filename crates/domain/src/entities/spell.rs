//! Spell record.

use serde::{Deserialize, Serialize};

/// A spell from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spell {
    pub id: String,
    #[serde(skip)]
    pub is_favorite: bool,
    pub slug: String,
    pub name: String,
    pub incantation: String,
    pub effect: String,
    pub category: String,
    pub creator: String,
    pub light: String,
    /// Wand movement description; the wire key has no separator.
    #[serde(rename = "handmovement")]
    pub hand_movement: String,
    pub image: Option<String>,
    pub wiki: String,
}
