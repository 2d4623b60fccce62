//! Potion record.

use serde::{Deserialize, Serialize};

/// A potion from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Potion {
    pub id: String,
    #[serde(skip)]
    pub is_favorite: bool,
    pub slug: String,
    pub name: String,
    pub characteristics: String,
    pub effect: String,
    pub difficulty: String,
    pub ingredients: String,
    pub inventors: String,
    pub manufacturers: String,
    pub side_effects: String,
    pub image: Option<String>,
    pub wiki: String,
}
