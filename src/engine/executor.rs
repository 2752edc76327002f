use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::error::TransferError;
use crate::domain::{
    AccountId, Amount, DomainError, LedgerEntry, apply_credit, apply_debit,
};
use crate::storage::{AccountGuard, AccountStore, LedgerStore};

/// Atomic, lock-ordered transfers between two accounts
///
/// The executor is the only component that takes account locks and mutates
/// balances. Both accounts are held for the whole check-mutate-record
/// sequence, so no other operation can observe an intermediate state.
pub struct TransferExecutor<S, L>
where
    S: AccountStore,
    L: LedgerStore,
{
    accounts: S,
    ledger: L,
}

impl<S, L> TransferExecutor<S, L>
where
    S: AccountStore,
    L: LedgerStore,
{
    /// Create a new executor over the given stores
    pub fn new(accounts: S, ledger: L) -> Self {
        Self { accounts, ledger }
    }

    pub fn accounts(&self) -> &S {
        &self.accounts
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Move `source_amount` out of the source account and `destination_amount`
    /// into the destination account.
    ///
    /// The two amounts are already resolved by the caller and may differ when
    /// a currency conversion happened upstream.
    ///
    /// Returns the recorded ledger entry. An entry with status `FAILED` means
    /// the source balance was insufficient and nothing moved; that is a
    /// normal outcome, not an error.
    ///
    /// # Errors
    /// * [`TransferError::SameAccount`] before any lock is attempted
    /// * [`TransferError::NonPositiveAmount`] before any lock is attempted
    /// * [`TransferError::AccountNotFound`] if either account is missing
    /// * [`TransferError::Storage`] on a lock timeout or ledger failure
    ///
    /// No ledger entry is written and no balance changes in any error case.
    pub async fn transfer(
        &self,
        timestamp: DateTime<Utc>,
        source_id: AccountId,
        source_amount: Amount,
        destination_id: AccountId,
        destination_amount: Amount,
        description: String,
    ) -> Result<LedgerEntry, TransferError> {
        let (first_id, second_id) = source_id
            .lock_order(destination_id)
            .ok_or(TransferError::SameAccount(source_id))?;

        if !source_amount.is_positive() || !destination_amount.is_positive() {
            return Err(TransferError::NonPositiveAmount);
        }

        debug!(source = %source_id, destination = %destination_id, "Processing transfer");

        // Canonical order: A->B and B->A both lock the smaller id first
        let first = self.lock(first_id).await?;
        let second = self.lock(second_id).await?;

        let (mut source, mut destination) = if first_id == source_id {
            (first, second)
        } else {
            (second, first)
        };

        let mut debited = source.read().clone();
        match apply_debit(&mut debited, &source_amount) {
            Ok(()) => {}
            Err(DomainError::InsufficientBalance) => {
                warn!(
                    source = %source_id,
                    destination = %destination_id,
                    balance = %source.read().balance(),
                    amount = %source_amount,
                    "Insufficient balance"
                );
                let entry = LedgerEntry::insufficient_balance(
                    timestamp,
                    source.read(),
                    source_amount,
                    destination.read(),
                    destination_amount,
                );
                return Ok(self.ledger.save(entry)?);
            }
            Err(e) => return Err(e.into()),
        }

        let mut credited = destination.read().clone();
        apply_credit(&mut credited, &destination_amount)?;

        // Every fallible step happens before the first write; committing to
        // the held guards cannot fail. No await past this point, so dropping
        // the future never leaves a partial transfer behind.
        let entry = self.ledger.save(LedgerEntry::completed(
            timestamp,
            &debited,
            source_amount,
            &credited,
            destination_amount,
            description,
        ))?;

        source.save(debited);
        destination.save(credited);

        debug!(entry = %entry.id(), "Transfer completed");
        Ok(entry)
    }

    async fn lock(&self, id: AccountId) -> Result<S::Guard, TransferError> {
        self.accounts.find_for_update(id).await?.ok_or_else(|| {
            warn!(account = %id, "Account not found");
            TransferError::AccountNotFound(id)
        })
    }
}
