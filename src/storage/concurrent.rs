use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::{DashMap, Entry};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use super::error::StorageError;
use super::traits::{AccountGuard, AccountStore};
use crate::domain::{Account, AccountId};

type AccountCell = Arc<Mutex<Account>>;

/// Concurrent in-memory account store
///
/// The map only hands out per-account cells; the exclusive hold is the
/// cell's own mutex, so no map shard lock is ever held while waiting.
pub struct InMemoryAccountStore {
    accounts: DashMap<AccountId, AccountCell>,
    lock_timeout: Option<Duration>,
}

impl InMemoryAccountStore {
    /// Create a new empty store with unbounded lock waits
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            lock_timeout: None,
        }
    }

    /// Bound how long `find_for_update` waits for a held account
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }

    /// Register an account; ids are unique
    pub fn insert(&self, account: Account) -> Result<(), StorageError> {
        match self.accounts.entry(account.id()) {
            Entry::Occupied(e) => Err(StorageError::DuplicateAccount(*e.key())),
            Entry::Vacant(e) => {
                e.insert(Arc::new(Mutex::new(account)));
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Consistent copy of every account, in canonical id order
    ///
    /// Holds all accounts at once, acquired in the same order transfers use,
    /// so it never observes one side of an in-flight transfer.
    pub async fn snapshot(&self) -> Vec<Account> {
        let mut cells: Vec<(AccountId, AccountCell)> = self
            .accounts
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();
        cells.sort_by_key(|(id, _)| *id);

        let mut guards = Vec::with_capacity(cells.len());
        for (_, cell) in cells {
            guards.push(cell.lock_owned().await);
        }

        guards.iter().map(|guard| (**guard).clone()).collect()
    }

    fn cell(&self, id: AccountId) -> Option<AccountCell> {
        self.accounts.get(&id).map(|entry| Arc::clone(entry.value()))
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive hold on one in-memory account
pub struct InMemoryAccountGuard {
    guard: OwnedMutexGuard<Account>,
}

impl AccountGuard for InMemoryAccountGuard {
    fn read(&self) -> &Account {
        &self.guard
    }

    fn save(&mut self, account: Account) -> Account {
        debug_assert_eq!(account.id(), self.guard.id());
        *self.guard = account;
        self.guard.clone()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    type Guard = InMemoryAccountGuard;

    async fn find_for_update(&self, id: AccountId) -> Result<Option<Self::Guard>, StorageError> {
        let Some(cell) = self.cell(id) else {
            return Ok(None);
        };

        let guard = match self.lock_timeout {
            Some(timeout) => tokio::time::timeout(timeout, cell.lock_owned())
                .await
                .map_err(|_| {
                    warn!(account = %id, ?timeout, "Lock wait timed out");
                    StorageError::LockTimeout(id)
                })?,
            None => cell.lock_owned().await,
        };

        debug!(account = %id, "Account locked");
        Ok(Some(InMemoryAccountGuard { guard }))
    }

    async fn find(&self, id: AccountId) -> Option<Account> {
        let cell = self.cell(id)?;
        let account = cell.lock().await.clone();
        Some(account)
    }
}
