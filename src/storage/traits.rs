use std::sync::Arc;

use async_trait::async_trait;

use super::error::StorageError;
use crate::domain::{Account, AccountId, LedgerEntry};

/// Exclusive hold on one account, released when dropped
pub trait AccountGuard: Send {
    /// Current state of the held account
    fn read(&self) -> &Account;

    /// Persist a new state for the held account and return it
    fn save(&mut self, account: Account) -> Account;
}

/// Transactional account storage with pluggable backends
#[async_trait]
pub trait AccountStore: Send + Sync {
    type Guard: AccountGuard;

    /// Look up an account and take an exclusive hold on it
    ///
    /// The hold lasts until the returned guard is dropped. `Ok(None)` means
    /// the account does not exist.
    async fn find_for_update(&self, id: AccountId) -> Result<Option<Self::Guard>, StorageError>;

    /// Point-in-time copy of an account, without keeping any hold
    async fn find(&self, id: AccountId) -> Option<Account>;
}

/// Pagination window over ledger history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Append-only store of ledger entries
pub trait LedgerStore: Send + Sync {
    /// Append an entry (never overwrites an existing one)
    fn save(&self, entry: LedgerEntry) -> Result<LedgerEntry, StorageError>;

    /// Entries touching the account, newest first
    fn history(&self, account_id: AccountId, page: Page) -> Vec<LedgerEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Shared handles: stores are typically wrapped in Arc and cloned into tasks
#[async_trait]
impl<S: AccountStore + ?Sized> AccountStore for Arc<S> {
    type Guard = S::Guard;

    async fn find_for_update(&self, id: AccountId) -> Result<Option<Self::Guard>, StorageError> {
        (**self).find_for_update(id).await
    }

    async fn find(&self, id: AccountId) -> Option<Account> {
        (**self).find(id).await
    }
}

impl<L: LedgerStore + ?Sized> LedgerStore for Arc<L> {
    fn save(&self, entry: LedgerEntry) -> Result<LedgerEntry, StorageError> {
        (**self).save(entry)
    }

    fn history(&self, account_id: AccountId, page: Page) -> Vec<LedgerEntry> {
        (**self).history(account_id, page)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
