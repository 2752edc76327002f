use thiserror::Error;

use crate::domain::{AccountId, EntryId};

/// Storage-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Account already exists: {0}")]
    DuplicateAccount(AccountId),

    #[error("Ledger entry already recorded: {0}")]
    DuplicateEntry(EntryId),

    #[error("Timed out waiting for lock on account {0}")]
    LockTimeout(AccountId),
}
