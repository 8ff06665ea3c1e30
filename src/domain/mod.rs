//! Domain layer: entities and the materialized-path model
//!
//! This layer is independent of external concerns (no I/O, no HTTP, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod path;

pub use builder::ForestBuilder;
pub use entities::*;
pub use error::DomainError;
pub use path::{is_segment, validate_segment, MaterializedPath, SEPARATOR};
