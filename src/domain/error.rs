//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the materialized-path model.
/// These are independent of storage and transport concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid party id: {0:?}")]
    InvalidId(String),
}
