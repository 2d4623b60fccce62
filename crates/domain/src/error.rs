//! Decode failures for raw catalog records.

use thiserror::Error;

use crate::kind::EntityKind;

/// Why a raw record could not be turned into a typed entity.
///
/// Optional attributes never fail a decode; they default. These variants all
/// indicate a record that cannot be identified or displayed at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// The record has no `id`, or an empty one.
    #[error("record has no id")]
    MissingId,

    /// The record has no `attributes` object.
    #[error("record has no attributes object")]
    MissingAttributes,

    /// The record's `type` tag names a different kind than requested.
    #[error("type tag mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: EntityKind,
        found: String,
    },

    /// A field every record of this kind must carry is missing or empty.
    #[error("required field `{0}` is missing or empty")]
    MissingRequiredField(&'static str),

    /// The attributes object has the wrong shape for this kind.
    #[error("malformed attributes: {0}")]
    InvalidAttributes(String),
}
