use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{ExpenseEntry, OwnerId},
    errors::StoreError,
    utils::persistence::write_atomic,
};

use super::{select_recent, LedgerStore, Result};

pub const LEDGER_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    schema_version: u32,
    #[serde(default)]
    entries: Vec<ExpenseEntry>,
}

/// Single-file JSON ledger.
///
/// Writers are serialized through a mutex and every write replaces the file
/// atomically, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug)]
pub struct JsonLedgerStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLedgerStore {
    /// Opens (or lazily creates) the ledger at `path`, rejecting unreadable files up front.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };
        store.read()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| StoreError::Unavailable("ledger lock poisoned".into()))
    }

    fn read(&self) -> Result<LedgerFile> {
        if !self.path.exists() {
            return Ok(LedgerFile {
                schema_version: LEDGER_SCHEMA_VERSION,
                entries: Vec::new(),
            });
        }
        let data = fs::read_to_string(&self.path)?;
        let file: LedgerFile = serde_json::from_str(&data)?;
        if file.schema_version > LEDGER_SCHEMA_VERSION {
            return Err(StoreError::UnsupportedSchema(file.schema_version));
        }
        Ok(file)
    }

    fn write(&self, file: &LedgerFile) -> Result<()> {
        let json = serde_json::to_string_pretty(file)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

impl LedgerStore for JsonLedgerStore {
    fn create(&self, entry: ExpenseEntry) -> Result<Uuid> {
        let _guard = self.guard()?;
        let mut file = self.read()?;
        let id = entry.id;
        file.entries.push(entry);
        self.write(&file)?;
        debug!(%id, path = %self.path.display(), "Expense written to ledger");
        Ok(id)
    }

    fn list_recent(&self, owner: &OwnerId, limit: usize) -> Result<Vec<ExpenseEntry>> {
        let _guard = self.guard()?;
        let file = self.read()?;
        Ok(select_recent(file.entries.iter(), owner, limit))
    }

    fn delete(&self, id: Uuid, owner: &OwnerId) -> Result<bool> {
        let _guard = self.guard()?;
        let mut file = self.read()?;
        let Some(index) = file
            .entries
            .iter()
            .position(|entry| entry.id == id && entry.is_owned_by(owner))
        else {
            return Ok(false);
        };
        file.entries.remove(index);
        self.write(&file)?;
        Ok(true)
    }
}
