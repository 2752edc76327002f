use dashmap::{DashMap, Entry};
use tracing::debug;

use super::error::StorageError;
use super::traits::{LedgerStore, Page};
use crate::domain::{AccountId, EntryId, LedgerEntry};

/// DashMap-based append-only ledger (thread-safe)
/// Entries are immutable once inserted
pub struct InMemoryLedger {
    entries: DashMap<EntryId, LedgerEntry>,
}

impl InMemoryLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Look up a single entry (returns clone, not reference)
    pub fn get(&self, id: EntryId) -> Option<LedgerEntry> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedger {
    fn save(&self, entry: LedgerEntry) -> Result<LedgerEntry, StorageError> {
        match self.entries.entry(entry.id()) {
            Entry::Occupied(e) => Err(StorageError::DuplicateEntry(*e.key())),
            Entry::Vacant(e) => {
                debug!(entry = %entry.id(), status = %entry.status(), "Ledger entry recorded");
                e.insert(entry.clone());
                Ok(entry)
            }
        }
    }

    fn history(&self, account_id: AccountId, page: Page) -> Vec<LedgerEntry> {
        let mut matching: Vec<LedgerEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.value().involves(account_id))
            .map(|entry| entry.value().clone())
            .collect();

        // Newest first; id breaks timestamp ties so pages are stable
        matching.sort_by(|a, b| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| b.id().cmp(&a.id()))
        });

        matching
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
