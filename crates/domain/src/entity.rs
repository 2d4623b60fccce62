//! A catalog entity of any kind.

use crate::entities::{Book, Character, Movie, Potion, Spell};
use crate::kind::EntityKind;

/// One entity record, tagged with its kind.
///
/// Services and the favorites collection handle entities uniformly through
/// the accessors here; anything kind-specific matches on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Character(Character),
    Spell(Spell),
    Potion(Potion),
    Book(Book),
    Movie(Movie),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Character(_) => EntityKind::Character,
            Entity::Spell(_) => EntityKind::Spell,
            Entity::Potion(_) => EntityKind::Potion,
            Entity::Book(_) => EntityKind::Book,
            Entity::Movie(_) => EntityKind::Movie,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Character(c) => &c.id,
            Entity::Spell(s) => &s.id,
            Entity::Potion(p) => &p.id,
            Entity::Book(b) => &b.id,
            Entity::Movie(m) => &m.id,
        }
    }

    /// The human-facing name: `name` for characters, spells, and potions,
    /// `title` for books and movies.
    pub fn display_name(&self) -> &str {
        match self {
            Entity::Character(c) => &c.name,
            Entity::Spell(s) => &s.name,
            Entity::Potion(p) => &p.name,
            Entity::Book(b) => &b.title,
            Entity::Movie(m) => &m.title,
        }
    }

    pub fn is_favorite(&self) -> bool {
        match self {
            Entity::Character(c) => c.is_favorite,
            Entity::Spell(s) => s.is_favorite,
            Entity::Potion(p) => p.is_favorite,
            Entity::Book(b) => b.is_favorite,
            Entity::Movie(m) => m.is_favorite,
        }
    }

    pub fn set_favorite(&mut self, favorite: bool) {
        match self {
            Entity::Character(c) => c.is_favorite = favorite,
            Entity::Spell(s) => s.is_favorite = favorite,
            Entity::Potion(p) => p.is_favorite = favorite,
            Entity::Book(b) => b.is_favorite = favorite,
            Entity::Movie(m) => m.is_favorite = favorite,
        }
    }
}

impl From<Character> for Entity {
    fn from(record: Character) -> Self {
        Entity::Character(record)
    }
}

impl From<Spell> for Entity {
    fn from(record: Spell) -> Self {
        Entity::Spell(record)
    }
}

impl From<Potion> for Entity {
    fn from(record: Potion) -> Self {
        Entity::Potion(record)
    }
}

impl From<Book> for Entity {
    fn from(record: Book) -> Self {
        Entity::Book(record)
    }
}

impl From<Movie> for Entity {
    fn from(record: Movie) -> Self {
        Entity::Movie(record)
    }
}
