//! Lorebook client - the data-access layer behind the catalog UI.
//!
//! Structure mirrors the application's dependency direction:
//!
//! - [`ports`]: outbound interfaces (catalog API, storage, connectivity)
//! - [`application`]: entity services and the favorites collection
//! - [`infrastructure`]: concrete adapters for the outbound ports
//! - [`state`]: composition root wiring one favorites store into the
//!   per-kind services
//!
//! The presentation layer consumes [`EntityService`] and [`FavoritesStore`]
//! and never touches adapters directly.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod state;

pub use application::favorites::{FavoritesStore, StoreError};
pub use application::services::EntityService;
pub use application::ServiceError;
pub use config::ClientConfig;
pub use state::AppServices;

pub use lorebook_domain::{Entity, EntityKind};
