//! Party hierarchy service
//!
//! Owns the materialized-path rules: paths are computed once on create from
//! the owner's current path, ancestors are parsed out of a party's own path,
//! descendants are found by segment search over every stored path.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::DanglingOwnerPolicy;
use crate::domain::{
    is_segment, validate_segment, ForestBuilder, MaterializedPath, NewParty, Party, PartyTree,
};
use crate::infrastructure::traits::PartyStore;

/// Service for creating, reading and traversing the party hierarchy.
pub struct HierarchyService {
    store: Arc<dyn PartyStore>,
    dangling_owner: DanglingOwnerPolicy,
}

impl HierarchyService {
    /// Create a new hierarchy service.
    pub fn new(store: Arc<dyn PartyStore>, dangling_owner: DanglingOwnerPolicy) -> Self {
        Self {
            store,
            dangling_owner,
        }
    }

    /// Create a party, snapshotting the owner's path.
    ///
    /// With [`DanglingOwnerPolicy::Reject`] an unknown owner fails with
    /// [`ApplicationError::DanglingOwner`]. With [`DanglingOwnerPolicy::Allow`]
    /// the party is stored with the unresolved owner id and an empty path.
    /// An owner id containing the path separator is rejected under either policy.
    #[instrument(level = "debug", skip(self, input), fields(name = %input.name))]
    pub fn create(&self, input: NewParty) -> ApplicationResult<Party> {
        let (owner_id, path) = match input.owner() {
            None => (None, MaterializedPath::root()),
            Some(owner_id) => match self.store.find_by_id(validated(owner_id)?)? {
                Some(owner) => {
                    let path = owner.child_path();
                    (Some(owner.id), path)
                }
                None => match self.dangling_owner {
                    DanglingOwnerPolicy::Reject => {
                        debug!("create: rejecting unknown owner {owner_id}");
                        return Err(ApplicationError::DanglingOwner(owner_id.to_string()));
                    }
                    DanglingOwnerPolicy::Allow => {
                        warn!("create: owner {owner_id} does not exist, storing with empty path");
                        (Some(owner_id.to_string()), MaterializedPath::root())
                    }
                },
            },
        };

        let party = Party {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            owner_id,
            path,
        };
        self.store.insert(&party)?;
        info!(
            "created party {} at {:?} (depth {})",
            party.id,
            party.path.as_str(),
            party.path.depth()
        );
        Ok(party)
    }

    /// Fetch one party.
    pub fn get(&self, id: &str) -> ApplicationResult<Party> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ApplicationError::NotFound(id.to_string()))
    }

    /// Every party, order unspecified.
    pub fn list(&self) -> ApplicationResult<Vec<Party>> {
        Ok(self.store.find_all()?)
    }

    /// Remove one party. Descendants keep their records and path segments.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: &str) -> ApplicationResult<()> {
        if self.store.delete(id)? {
            info!("deleted party {id}");
            Ok(())
        } else {
            Err(ApplicationError::NotFound(id.to_string()))
        }
    }

    /// Ancestors of a party, root first, immediate owner last.
    ///
    /// Path segments that no longer resolve (deleted ancestors) are skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn ancestors(&self, id: &str) -> ApplicationResult<Vec<Party>> {
        let party = self.get(id)?;
        let ids = party.ancestor_ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut found: HashMap<String, Party> = self
            .store
            .find_by_ids(&ids)?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        debug!("ancestors: {} of {} path segments resolved", found.len(), ids.len());

        Ok(ids.iter().filter_map(|id| found.remove(*id)).collect())
    }

    /// Every party with `id` anywhere in its lineage.
    ///
    /// `id` need not exist: subsidiaries of a deleted party are still found.
    #[instrument(level = "debug", skip(self))]
    pub fn descendants(&self, id: &str) -> ApplicationResult<Vec<Party>> {
        if !is_segment(id) {
            debug!("descendants: {id:?} cannot be a path segment");
            return Ok(Vec::new());
        }
        Ok(self.store.find_by_path_segment(id)?)
    }

    /// All parties arranged as owner/subsidiary trees.
    pub fn forest(&self) -> ApplicationResult<Vec<PartyTree>> {
        let parties = self.store.find_all()?;
        Ok(ForestBuilder::new(parties).build())
    }

    /// Number of stored parties.
    pub fn count(&self) -> ApplicationResult<usize> {
        Ok(self.store.count()?)
    }
}

fn validated(owner_id: &str) -> ApplicationResult<&str> {
    validate_segment(owner_id)?;
    Ok(owner_id)
}
