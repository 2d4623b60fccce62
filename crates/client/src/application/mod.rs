//! Application layer - entity services and the favorites collection.

pub mod error;
pub mod favorites;
pub mod services;

pub use error::ServiceError;
pub use favorites::{FavoritesStore, StoreError};
