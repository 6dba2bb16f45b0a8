use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::{
    domain::{ExpenseEntry, OwnerId},
    errors::StoreError,
};

use super::{select_recent, LedgerStore, Result};

/// Process-local store, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    entries: RwLock<Vec<ExpenseEntry>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total entries across every owner. Still counts after a writer panicked.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("ledger lock poisoned".into())
}

impl LedgerStore for MemoryLedgerStore {
    fn create(&self, entry: ExpenseEntry) -> Result<Uuid> {
        let id = entry.id;
        self.entries.write().map_err(|_| poisoned())?.push(entry);
        Ok(id)
    }

    fn list_recent(&self, owner: &OwnerId, limit: usize) -> Result<Vec<ExpenseEntry>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(select_recent(entries.iter(), owner, limit))
    }

    fn delete(&self, id: Uuid, owner: &OwnerId) -> Result<bool> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let before = entries.len();
        entries.retain(|entry| !(entry.id == id && entry.is_owned_by(owner)));
        Ok(entries.len() != before)
    }
}
