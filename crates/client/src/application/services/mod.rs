//! Application services - per-kind facades over the API, codec, favorites,
//! and an in-memory cache.

mod entity_service;

pub use entity_service::EntityService;
