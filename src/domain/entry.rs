use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::account::{Account, AccountId};
use super::amount::Amount;

/// Description recorded on every refused transfer
pub const INSUFFICIENT_BALANCE: &str = "insufficient balance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Outcome of a transfer attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    Completed,
    Failed,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one transfer attempt
///
/// Fields are private and there are no setters: once built an entry only
/// moves into the append-only ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    id: EntryId,
    status: EntryStatus,
    timestamp: DateTime<Utc>,
    source_account_id: AccountId,
    source_amount: Amount,
    source_balance_after: Amount,
    destination_account_id: AccountId,
    destination_amount: Amount,
    destination_balance_after: Amount,
    description: String,
}

impl LedgerEntry {
    /// Record a completed transfer; `source` and `destination` carry the
    /// post-mutation balances
    pub fn completed(
        timestamp: DateTime<Utc>,
        source: &Account,
        source_amount: Amount,
        destination: &Account,
        destination_amount: Amount,
        description: String,
    ) -> Self {
        Self::build(
            EntryStatus::Completed,
            timestamp,
            source,
            source_amount,
            destination,
            destination_amount,
            description,
        )
    }

    /// Record a transfer refused for insufficient balance; the accounts are
    /// unchanged and the caller's description is replaced
    pub fn insufficient_balance(
        timestamp: DateTime<Utc>,
        source: &Account,
        source_amount: Amount,
        destination: &Account,
        destination_amount: Amount,
    ) -> Self {
        Self::build(
            EntryStatus::Failed,
            timestamp,
            source,
            source_amount,
            destination,
            destination_amount,
            INSUFFICIENT_BALANCE.to_string(),
        )
    }

    fn build(
        status: EntryStatus,
        timestamp: DateTime<Utc>,
        source: &Account,
        source_amount: Amount,
        destination: &Account,
        destination_amount: Amount,
        description: String,
    ) -> Self {
        Self {
            id: EntryId::random(),
            status,
            timestamp,
            source_account_id: source.id(),
            source_amount,
            source_balance_after: source.balance().clone(),
            destination_account_id: destination.id(),
            destination_amount,
            destination_balance_after: destination.balance().clone(),
            description,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn status(&self) -> EntryStatus {
        self.status
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn source_account_id(&self) -> AccountId {
        self.source_account_id
    }

    pub fn source_amount(&self) -> &Amount {
        &self.source_amount
    }

    pub fn source_balance_after(&self) -> &Amount {
        &self.source_balance_after
    }

    pub fn destination_account_id(&self) -> AccountId {
        self.destination_account_id
    }

    pub fn destination_amount(&self) -> &Amount {
        &self.destination_amount
    }

    pub fn destination_balance_after(&self) -> &Amount {
        &self.destination_balance_after
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the entry touches the given account on either side
    pub fn involves(&self, account_id: AccountId) -> bool {
        self.source_account_id == account_id || self.destination_account_id == account_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;

    fn account(balance: i64) -> Account {
        Account::new(AccountId::random(), Currency::USD, Amount::from(balance)).unwrap()
    }

    #[test]
    fn completed_entry_keeps_description_and_balances() {
        let source = account(900);
        let destination = account(1_100);
        let now = Utc::now();

        let entry = LedgerEntry::completed(
            now,
            &source,
            Amount::from(100),
            &destination,
            Amount::from(100),
            "rent".to_string(),
        );

        assert_eq!(entry.status(), EntryStatus::Completed);
        assert_eq!(entry.timestamp(), now);
        assert_eq!(entry.source_account_id(), source.id());
        assert_eq!(entry.destination_account_id(), destination.id());
        assert_eq!(entry.source_balance_after(), &Amount::from(900));
        assert_eq!(entry.destination_balance_after(), &Amount::from(1_100));
        assert_eq!(entry.description(), "rent");
    }

    #[test]
    fn insufficient_balance_entry_discards_description() {
        let source = account(0);
        let destination = account(1);

        let entry = LedgerEntry::insufficient_balance(
            Utc::now(),
            &source,
            Amount::from(1),
            &destination,
            Amount::from(1),
        );

        assert_eq!(entry.status(), EntryStatus::Failed);
        assert_eq!(entry.description(), INSUFFICIENT_BALANCE);
    }

    #[test]
    fn amounts_may_differ_across_sides() {
        let source = account(500);
        let destination = account(0);

        let entry = LedgerEntry::completed(
            Utc::now(),
            &source,
            Amount::from(93),
            &destination,
            Amount::from(100),
            String::new(),
        );

        assert_eq!(entry.source_amount(), &Amount::from(93));
        assert_eq!(entry.destination_amount(), &Amount::from(100));
    }

    #[test]
    fn each_entry_gets_its_own_id() {
        let source = account(1);
        let destination = account(1);
        let a = LedgerEntry::insufficient_balance(Utc::now(), &source, Amount::from(5), &destination, Amount::from(5));
        let b = LedgerEntry::insufficient_balance(Utc::now(), &source, Amount::from(5), &destination, Amount::from(5));

        assert_ne!(a.id(), b.id());
        assert!(a.involves(source.id()));
        assert!(a.involves(destination.id()));
        assert!(!a.involves(AccountId::random()));
    }

    #[test]
    fn status_renders_upper_case() {
        assert_eq!(EntryStatus::Completed.to_string(), "COMPLETED");
        assert_eq!(EntryStatus::Failed.to_string(), "FAILED");
    }
}
