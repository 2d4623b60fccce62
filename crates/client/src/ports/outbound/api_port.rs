//! Catalog API port - object-safe boundary to the remote service.
//!
//! The remote service is read-only and paginated; page size is fixed by the
//! server and treated as opaque here. Adapters surface exactly one failure
//! per request - no retries, no fallback; fallback policy belongs to the
//! services on top.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use lorebook_domain::EntityKind;

/// Transport or server failure from the catalog API.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// No response at all (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("http error: status {status}")]
    Http { status: u16 },

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    Malformed(String),
}

/// Read access to the remote catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApiPort: Send + Sync {
    /// Fetch one page (1-based) of the kind's collection.
    async fn fetch_page(&self, kind: EntityKind, page: u32) -> Result<Value, ApiError>;

    /// Fetch a single record by id.
    async fn fetch_by_id(&self, kind: EntityKind, id: &str) -> Result<Value, ApiError>;

    /// Fetch one page of records whose `field` contains `value`.
    async fn fetch_filtered(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
        page: u32,
    ) -> Result<Value, ApiError>;
}
