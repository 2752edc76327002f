use thiserror::Error;

use crate::domain::{AccountId, DomainError};
use crate::storage::StorageError;

/// Fatal transfer errors: the attempt is aborted and no ledger entry is written
///
/// Insufficient balance is not one of these; it is a completed call that
/// returns a `FAILED` ledger entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountId),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Transfer amounts must be positive")]
    NonPositiveAmount,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
