//! Movie record.

use serde::{Deserialize, Serialize};

/// A movie from the catalog. Like books, movies are titled; `title` is the
/// required display field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: String,
    #[serde(skip)]
    pub is_favorite: bool,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub directors: Vec<String>,
    pub screenwriters: Vec<String>,
    pub producers: Vec<String>,
    pub music_composers: Vec<String>,
    pub cinematographers: Vec<String>,
    pub editors: Vec<String>,
    pub distributors: Vec<String>,
    pub release_date: Option<String>,
    pub running_time: String,
    pub rating: String,
    pub budget: String,
    pub box_office: String,
    pub poster: Option<String>,
    pub trailer: Option<String>,
    pub wiki: String,
}
