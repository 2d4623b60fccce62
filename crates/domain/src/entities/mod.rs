//! Entity records - plain data for each catalog kind.
//!
//! Records carry no rendering or networking concerns. Every attribute
//! defaults to an empty value when the remote record omits it; only the id
//! and the display name are required for a record to be usable.

mod book;
mod character;
mod movie;
mod potion;
mod spell;

pub use book::Book;
pub use character::Character;
pub use movie::Movie;
pub use potion::Potion;
pub use spell::Spell;
