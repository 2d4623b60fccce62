//! Book record.

use serde::{Deserialize, Serialize};

/// A book from the catalog. Books are titled rather than named; `title` is
/// the required display field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub id: String,
    #[serde(skip)]
    pub is_favorite: bool,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub dedication: String,
    pub pages: Option<u32>,
    pub release_date: Option<String>,
    pub cover: Option<String>,
    pub wiki: String,
}
