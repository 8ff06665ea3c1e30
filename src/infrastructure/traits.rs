//! Storage boundary trait
//!
//! The hierarchy service only needs a record store offering exact-match
//! lookup, batched id lookup, path-segment search and unique ids. Engines
//! implement this trait so services can be tested against an in-memory
//! store and run against SQLite.

use thiserror::Error;

use crate::domain::Party;

/// Errors raised by a storage engine.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("party already exists: {0}")]
    Conflict(String),

    #[error("corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },

    #[error("store lock poisoned")]
    Poisoned,
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent collection of parties keyed by id.
pub trait PartyStore: Send + Sync {
    /// Persist a new party. Fails with [`StoreError::Conflict`] on duplicate id.
    fn insert(&self, party: &Party) -> StoreResult<()>;

    /// Exact-match lookup.
    fn find_by_id(&self, id: &str) -> StoreResult<Option<Party>>;

    /// Batched lookup; ids without a record are skipped. Order unspecified.
    fn find_by_ids(&self, ids: &[&str]) -> StoreResult<Vec<Party>>;

    /// Every stored party. Order unspecified.
    fn find_all(&self) -> StoreResult<Vec<Party>>;

    /// Parties whose path holds `id` as a whole segment.
    fn find_by_path_segment(&self, id: &str) -> StoreResult<Vec<Party>>;

    /// Remove one record. Returns whether a record was removed.
    fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Number of stored parties.
    fn count(&self) -> StoreResult<usize>;
}
