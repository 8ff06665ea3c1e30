//! Infrastructure layer: storage engines and DI container
//!
//! This layer implements the storage boundary trait and wires up services.

pub mod di;
pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;

pub use di::ServiceContainer;
pub use error::{InfraError, InfraResult};
pub use memory::MemoryPartyStore;
pub use sqlite::SqlitePartyStore;
pub use traits::{PartyStore, StoreError, StoreResult};
