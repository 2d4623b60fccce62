//! Failures surfaced to the presentation layer.

use thiserror::Error;

use lorebook_domain::EntityKind;

use crate::application::favorites::StoreError;

/// Errors an entity service exposes to its callers.
///
/// Transport and decode failures are absorbed by the fallback policy and
/// never appear here; what remains is user-facing ("this item does not
/// exist", "search needs a connection") plus caller defects from the
/// favorites collection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// Neither the API nor the favorites collection has this entity.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    /// Search requires a live connection; there is no offline corpus to
    /// search against.
    #[error("offline: search is not available")]
    Offline,

    /// A favorites operation was called with an invalid entity.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}
