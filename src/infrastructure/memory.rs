//! In-process party store

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::Party;
use crate::infrastructure::traits::{PartyStore, StoreError, StoreResult};

/// Volatile store backed by a map. Used for tests and `backend = "memory"`.
#[derive(Debug, Default)]
pub struct MemoryPartyStore {
    parties: RwLock<BTreeMap<String, Party>>,
}

impl MemoryPartyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<String, Party>>> {
        self.parties.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<String, Party>>> {
        self.parties.write().map_err(|_| StoreError::Poisoned)
    }
}

impl PartyStore for MemoryPartyStore {
    fn insert(&self, party: &Party) -> StoreResult<()> {
        let mut parties = self.write()?;
        if parties.contains_key(&party.id) {
            return Err(StoreError::Conflict(party.id.clone()));
        }
        parties.insert(party.id.clone(), party.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<Party>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn find_by_ids(&self, ids: &[&str]) -> StoreResult<Vec<Party>> {
        let parties = self.read()?;
        Ok(parties
            .values()
            .filter(|p| ids.contains(&p.id.as_str()))
            .cloned()
            .collect())
    }

    fn find_all(&self) -> StoreResult<Vec<Party>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn find_by_path_segment(&self, id: &str) -> StoreResult<Vec<Party>> {
        Ok(self
            .read()?
            .values()
            .filter(|p| p.descends_from(id))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.write()?.remove(id).is_some())
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}
