pub mod json_backend;
pub mod memory;

use uuid::Uuid;

use crate::{
    domain::{ExpenseEntry, OwnerId},
    errors::StoreError,
};

pub type Result<T> = std::result::Result<T, StoreError>;

pub const MIN_RECENT_LIMIT: usize = 1;
pub const MAX_RECENT_LIMIT: usize = 100;

/// Durable home for confirmed expenses.
///
/// Implementations must make `create` atomic: an entry is either fully
/// visible with every field set, or not stored at all. Every read and delete
/// is scoped to a single owner.
pub trait LedgerStore: Send + Sync {
    fn create(&self, entry: ExpenseEntry) -> Result<Uuid>;

    /// Newest entries first; `limit` is clamped to `[1, 100]`.
    fn list_recent(&self, owner: &OwnerId, limit: usize) -> Result<Vec<ExpenseEntry>>;

    /// Removes the entry only when it belongs to `owner`; returns whether
    /// anything was deleted.
    fn delete(&self, id: Uuid, owner: &OwnerId) -> Result<bool>;
}

pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_RECENT_LIMIT, MAX_RECENT_LIMIT)
}

/// Shared `list_recent` selection over entries kept in insertion order.
pub(crate) fn select_recent<'a, I>(entries: I, owner: &OwnerId, limit: usize) -> Vec<ExpenseEntry>
where
    I: DoubleEndedIterator<Item = &'a ExpenseEntry>,
{
    let mut owned: Vec<ExpenseEntry> = entries
        .rev()
        .filter(|entry| entry.is_owned_by(owner))
        .cloned()
        .collect();
    owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    owned.truncate(clamp_limit(limit));
    owned
}

pub use json_backend::JsonLedgerStore;
pub use memory::MemoryLedgerStore;
