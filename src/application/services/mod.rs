//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the storage boundary trait (PartyStore)
//! but are themselves concrete structs, not traits.

mod hierarchy;
mod seed;

pub use hierarchy::HierarchyService;
pub use seed::{SeedReport, SeedService};
