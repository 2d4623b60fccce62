//! Outbound ports - interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must
//! implement, so the application layer can reach the catalog API and the
//! platform without depending on concrete implementations.

pub mod api_port;
pub mod platform;

pub use api_port::{ApiError, CatalogApiPort};
pub use platform::{storage_keys, ConnectivityProvider, StorageProvider};
