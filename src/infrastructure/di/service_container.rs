//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{HierarchyService, SeedService};
use crate::config::{Settings, StorageBackend};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::memory::MemoryPartyStore;
use crate::infrastructure::sqlite::SqlitePartyStore;
use crate::infrastructure::traits::PartyStore;
use crate::util::path::ensure_parent;

/// Container holding all application services.
///
/// The store handle is created once here and shared by every service;
/// nothing else in the crate opens a store.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Storage engine
    pub store: Arc<dyn PartyStore>,

    /// Hierarchy operations
    pub hierarchy: Arc<HierarchyService>,
}

impl ServiceContainer {
    /// Create a new service container with the configured storage engine.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let store: Arc<dyn PartyStore> = match settings.storage.backend {
            StorageBackend::Sqlite => {
                let database = &settings.storage.database;
                ensure_parent(database).map_err(|e| {
                    InfraError::io(format!("create directory for {}", database.display()), e)
                })?;
                debug!("storage: sqlite at {}", database.display());
                Arc::new(SqlitePartyStore::open(database)?)
            }
            StorageBackend::Memory => {
                debug!("storage: memory");
                Arc::new(MemoryPartyStore::new())
            }
        };
        Ok(Self::with_store(settings, store))
    }

    /// Create a service container with a custom store (for testing).
    pub fn with_store(settings: Settings, store: Arc<dyn PartyStore>) -> Self {
        let settings = Arc::new(settings);
        let hierarchy = Arc::new(HierarchyService::new(
            store.clone(),
            settings.hierarchy.dangling_owner,
        ));

        Self {
            settings,
            store,
            hierarchy,
        }
    }

    /// Seeder sharing this container's hierarchy service.
    pub fn seed_service(&self) -> SeedService {
        SeedService::new(self.hierarchy.clone())
    }
}
