//! Character record.

use serde::{Deserialize, Serialize};

/// A single character from the catalog.
///
/// String attributes default to empty and nullable attributes to `None`;
/// a record missing `id` or `name` is rejected at decode time rather than
/// represented here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub id: String,
    /// Recomputed from the favorites collection on every load; never stored.
    #[serde(skip)]
    pub is_favorite: bool,
    pub slug: String,
    pub name: String,
    pub alias_names: Vec<String>,
    pub animagus: Option<String>,
    pub blood_status: String,
    pub boggart: Option<String>,
    pub born: Option<String>,
    pub died: Option<String>,
    pub eye_color: Option<String>,
    pub family_members: Vec<String>,
    pub gender: String,
    pub hair_color: String,
    pub height: String,
    pub house: String,
    pub image: Option<String>,
    pub jobs: Vec<String>,
    pub marital_status: String,
    pub nationality: String,
    pub patronus: String,
    pub romances: Vec<String>,
    pub skin_color: String,
    pub species: String,
    pub titles: Vec<String>,
    pub wands: Vec<String>,
    pub weight: String,
    pub wiki: String,
}
