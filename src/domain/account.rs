use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use uuid::Uuid;

use super::amount::Amount;
use super::currency::Currency;
use super::error::DomainError;

/// Opaque 128-bit account identifier
///
/// Ordering is an unsigned byte-wise comparison of the 16 identifier bytes.
/// This is the canonical lock order: every transfer locks the smaller id
/// first, so all callers must agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Fresh random identifier
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The pair in canonical lock order, or `None` when both ids are equal
    pub fn lock_order(self, other: AccountId) -> Option<(AccountId, AccountId)> {
        match self.cmp(&other) {
            Ordering::Less => Some((self, other)),
            Ordering::Greater => Some((other, self)),
            Ordering::Equal => None,
        }
    }
}

impl Ord for AccountId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.as_bytes().cmp(other.0.as_bytes())
    }
}

impl PartialOrd for AccountId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Account with private fields enforcing the non-negative balance invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    currency: Currency,
    balance: Amount,
}

impl Account {
    /// Create an account, refusing a negative opening balance
    pub fn new(id: AccountId, currency: Currency, balance: Amount) -> Result<Self, DomainError> {
        if balance.is_negative() {
            return Err(DomainError::NegativeBalance);
        }

        Ok(Self {
            id,
            currency,
            balance,
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn balance(&self) -> &Amount {
        &self.balance
    }

    /// Balance rendered with the account currency's digits
    pub fn formatted_balance(&self) -> String {
        self.currency.format_amount(&self.balance)
    }

    // Only the operations module mutates balances
    pub(crate) fn set_balance(&mut self, balance: Amount) {
        self.balance = balance;
    }
}
