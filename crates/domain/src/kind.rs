//! The closed set of catalog entity kinds.
//!
//! A kind partitions both the in-memory cache and the favorites collection,
//! and selects the API collection a record is fetched from. Carrying the kind
//! as an explicit tag (rather than inferring it from a runtime type) keeps
//! dispatch data-driven and storage tags stable.

use std::fmt;

/// One of the catalog's entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Character,
    Spell,
    Potion,
    Book,
    Movie,
}

impl EntityKind {
    /// Canonical ordering, used wherever favorites are grouped by kind.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Character,
        EntityKind::Spell,
        EntityKind::Potion,
        EntityKind::Book,
        EntityKind::Movie,
    ];

    /// Lowercase tag, matching the API's `type` field and the top-level keys
    /// of the durable favorites payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Character => "character",
            EntityKind::Spell => "spell",
            EntityKind::Potion => "potion",
            EntityKind::Book => "book",
            EntityKind::Movie => "movie",
        }
    }

    /// Plural collection segment in API request paths.
    pub fn api_path(&self) -> &'static str {
        match self {
            EntityKind::Character => "characters",
            EntityKind::Spell => "spells",
            EntityKind::Potion => "potions",
            EntityKind::Book => "books",
            EntityKind::Movie => "movies",
        }
    }

    /// Concrete-record tag written next to each entity in durable storage.
    pub fn storage_tag(&self) -> &'static str {
        match self {
            EntityKind::Character => "Character",
            EntityKind::Spell => "Spell",
            EntityKind::Potion => "Potion",
            EntityKind::Book => "Book",
            EntityKind::Movie => "Movie",
        }
    }

    /// Filter parameter used for free-text search against this kind.
    ///
    /// Books and movies are titled rather than named, so they filter on a
    /// different attribute.
    pub fn search_field(&self) -> &'static str {
        match self {
            EntityKind::Book | EntityKind::Movie => "title_cont",
            _ => "name_cont",
        }
    }

    /// Parse a lowercase kind tag.
    pub fn from_tag(tag: &str) -> Option<EntityKind> {
        match tag {
            "character" => Some(EntityKind::Character),
            "spell" => Some(EntityKind::Spell),
            "potion" => Some(EntityKind::Potion),
            "book" => Some(EntityKind::Book),
            "movie" => Some(EntityKind::Movie),
            _ => None,
        }
    }

    /// Parse a storage record tag.
    pub fn from_storage_tag(tag: &str) -> Option<EntityKind> {
        match tag {
            "Character" => Some(EntityKind::Character),
            "Spell" => Some(EntityKind::Spell),
            "Potion" => Some(EntityKind::Potion),
            "Book" => Some(EntityKind::Book),
            "Movie" => Some(EntityKind::Movie),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_tag(kind.as_str()), Some(kind));
            assert_eq!(EntityKind::from_storage_tag(kind.storage_tag()), Some(kind));
        }
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert_eq!(EntityKind::from_tag("ghoul"), None);
        assert_eq!(EntityKind::from_storage_tag("character"), None);
    }

    #[test]
    fn titled_kinds_search_on_title() {
        assert_eq!(EntityKind::Book.search_field(), "title_cont");
        assert_eq!(EntityKind::Movie.search_field(), "title_cont");
        assert_eq!(EntityKind::Spell.search_field(), "name_cont");
    }
}
