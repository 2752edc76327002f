use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use super::conversion::{ConversionError, CurrencyConverter, NoConversion};
use super::error::TransferError;
use super::executor::TransferExecutor;
use crate::domain::{Account, AccountId, Amount, LedgerEntry};
use crate::storage::{AccountStore, LedgerStore, Page};

/// A transfer as requested by a client: amount in the destination currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub source: AccountId,
    pub destination: AccountId,
    pub currency: String,
    pub amount: String,
}

/// Request rejections, raised before the executor is reached
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Source account not found: {0}")]
    SourceNotFound(AccountId),

    #[error("Destination account not found: {0}")]
    DestinationNotFound(AccountId),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Source and destination are the same account: {0}")]
    SameAccount(AccountId),

    #[error("Currency {found} does not match destination currency {expected}")]
    CurrencyMismatch { expected: String, found: String },

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Page limit must be at least 1")]
    InvalidPageLimit,

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),
}

/// Validates client requests and resolves both legs before executing them
pub struct TransferHandler<S, L, C = NoConversion>
where
    S: AccountStore,
    L: LedgerStore,
    C: CurrencyConverter,
{
    executor: TransferExecutor<S, L>,
    converter: C,
}

impl<S, L> TransferHandler<S, L, NoConversion>
where
    S: AccountStore,
    L: LedgerStore,
{
    /// Handler that only accepts same-currency transfers
    pub fn new(executor: TransferExecutor<S, L>) -> Self {
        Self {
            executor,
            converter: NoConversion,
        }
    }
}

impl<S, L, C> TransferHandler<S, L, C>
where
    S: AccountStore,
    L: LedgerStore,
    C: CurrencyConverter,
{
    /// Swap in a converter for cross-currency transfers
    pub fn with_converter<D: CurrencyConverter>(self, converter: D) -> TransferHandler<S, L, D> {
        TransferHandler {
            executor: self.executor,
            converter,
        }
    }

    pub fn executor(&self) -> &TransferExecutor<S, L> {
        &self.executor
    }

    /// Validate a request and run it through the executor
    ///
    /// A returned entry may still carry status `FAILED` when the source
    /// balance is insufficient.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<LedgerEntry, RequestError> {
        let accounts = self.executor.accounts();

        let source = accounts
            .find(request.source)
            .await
            .ok_or(RequestError::SourceNotFound(request.source))?;
        let destination = accounts
            .find(request.destination)
            .await
            .ok_or(RequestError::DestinationNotFound(request.destination))?;

        if source.id() == destination.id() {
            return Err(RequestError::SameAccount(source.id()));
        }

        let currency = destination.currency();
        if request.currency != currency.code() {
            return Err(RequestError::CurrencyMismatch {
                expected: currency.code().to_string(),
                found: request.currency.clone(),
            });
        }

        let amount = currency
            .parse_amount(&request.amount)
            .map_err(|_| RequestError::InvalidAmount(request.amount.clone()))?;
        if !amount.is_positive() {
            return Err(RequestError::NonPositiveAmount);
        }

        let (source_amount, description) = if source.currency() == currency {
            let description = format!(
                "Transferred {} {} from {} to {}",
                currency.format_amount(&amount),
                currency,
                source.id(),
                destination.id()
            );
            (amount.clone(), description)
        } else {
            let source_amount = self.convert(&amount, &source, &destination).await?;
            let description = format!(
                "Transfer from {} ({} {}) to {} ({} {}) complete",
                source.id(),
                source.currency().format_amount(&source_amount),
                source.currency(),
                destination.id(),
                currency.format_amount(&amount),
                currency
            );
            (source_amount, description)
        };

        debug!(
            source = %source.id(),
            destination = %destination.id(),
            amount = %amount,
            "Transfer request accepted"
        );

        let entry = self
            .executor
            .transfer(
                Utc::now(),
                source.id(),
                source_amount,
                destination.id(),
                amount,
                description,
            )
            .await?;
        Ok(entry)
    }

    /// Ledger entries touching the account, newest first
    pub async fn history(
        &self,
        account_id: AccountId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<LedgerEntry>, RequestError> {
        if limit == 0 {
            return Err(RequestError::InvalidPageLimit);
        }
        if self.executor.accounts().find(account_id).await.is_none() {
            return Err(RequestError::AccountNotFound(account_id));
        }

        Ok(self
            .executor
            .ledger()
            .history(account_id, Page::new(offset, limit)))
    }

    async fn convert(
        &self,
        amount: &Amount,
        source: &Account,
        destination: &Account,
    ) -> Result<Amount, RequestError> {
        let converted = self
            .converter
            .convert(amount, source.currency(), destination.currency())
            .await?;

        if !converted.is_positive() {
            warn!(
                from = %source.currency(),
                to = %destination.currency(),
                amount = %amount,
                "Conversion produced a non-positive amount"
            );
            return Err(ConversionError::NonPositive {
                from: source.currency().code().to_string(),
                to: destination.currency().code().to_string(),
            }
            .into());
        }

        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, EntryStatus, INSUFFICIENT_BALANCE};
    use crate::storage::{InMemoryAccountStore, InMemoryLedger};
    use async_trait::async_trait;
    use num_bigint::BigInt;

    /// Fixed-rate converter: `amount * numerator / denominator`, truncated
    struct FixedRate {
        numerator: i64,
        denominator: i64,
    }

    #[async_trait]
    impl CurrencyConverter for FixedRate {
        async fn convert(
            &self,
            amount: &Amount,
            _from: &Currency,
            _to: &Currency,
        ) -> Result<Amount, ConversionError> {
            let minor = amount.minor_units() * BigInt::from(self.numerator)
                / BigInt::from(self.denominator);
            Ok(Amount::from_minor(minor))
        }
    }

    fn handler_with(
        accounts: &[(AccountId, Currency, i64)],
    ) -> TransferHandler<InMemoryAccountStore, InMemoryLedger> {
        let store = InMemoryAccountStore::new();
        for (id, currency, balance) in accounts {
            store
                .insert(Account::new(*id, currency.clone(), Amount::from(*balance)).unwrap())
                .unwrap();
        }
        TransferHandler::new(TransferExecutor::new(store, InMemoryLedger::new()))
    }

    fn request(source: AccountId, destination: AccountId, currency: &str, amount: &str) -> TransferRequest {
        TransferRequest {
            source,
            destination,
            currency: currency.to_string(),
            amount: amount.to_string(),
        }
    }

    async fn balance<S: AccountStore, L: LedgerStore, C: CurrencyConverter>(
        handler: &TransferHandler<S, L, C>,
        id: AccountId,
    ) -> Amount {
        handler.executor().accounts().find(id).await.unwrap().balance().clone()
    }

    #[tokio::test]
    async fn same_currency_transfer_completes() {
        let (a, b) = (AccountId::random(), AccountId::random());
        let handler = handler_with(&[(a, Currency::USD, 1_000), (b, Currency::USD, 0)]);

        let entry = handler.transfer(&request(a, b, "USD", "2.50")).await.unwrap();

        assert_eq!(entry.status(), EntryStatus::Completed);
        assert_eq!(entry.source_amount(), &Amount::from(250));
        assert_eq!(entry.destination_amount(), &Amount::from(250));
        assert_eq!(
            entry.description(),
            format!("Transferred 2.50 USD from {a} to {b}")
        );
        assert_eq!(balance(&handler, a).await, Amount::from(750));
        assert_eq!(balance(&handler, b).await, Amount::from(250));
    }

    #[tokio::test]
    async fn insufficient_balance_is_returned_as_failed_entry() {
        let (a, b) = (AccountId::random(), AccountId::random());
        let handler = handler_with(&[(a, Currency::USD, 100), (b, Currency::USD, 0)]);

        let entry = handler.transfer(&request(a, b, "USD", "1.01")).await.unwrap();

        assert_eq!(entry.status(), EntryStatus::Failed);
        assert_eq!(entry.description(), INSUFFICIENT_BALANCE);
        assert_eq!(balance(&handler, a).await, Amount::from(100));
    }

    #[tokio::test]
    async fn unknown_accounts_are_rejected() {
        let (a, b) = (AccountId::random(), AccountId::random());
        let handler = handler_with(&[(a, Currency::USD, 100)]);

        assert_eq!(
            handler.transfer(&request(b, a, "USD", "1")).await,
            Err(RequestError::SourceNotFound(b))
        );
        assert_eq!(
            handler.transfer(&request(a, b, "USD", "1")).await,
            Err(RequestError::DestinationNotFound(b))
        );
    }

    #[tokio::test]
    async fn same_account_is_rejected() {
        let a = AccountId::random();
        let handler = handler_with(&[(a, Currency::USD, 100)]);

        assert_eq!(
            handler.transfer(&request(a, a, "USD", "1")).await,
            Err(RequestError::SameAccount(a))
        );
        assert!(handler.executor().ledger().is_empty());
    }

    #[tokio::test]
    async fn currency_must_match_destination() {
        let (a, b) = (AccountId::random(), AccountId::random());
        let handler = handler_with(&[(a, Currency::USD, 100), (b, Currency::USD, 0)]);

        assert_eq!(
            handler.transfer(&request(a, b, "EUR", "1")).await,
            Err(RequestError::CurrencyMismatch {
                expected: "USD".to_string(),
                found: "EUR".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn amount_must_parse_and_be_positive() {
        let (a, b) = (AccountId::random(), AccountId::random());
        let handler = handler_with(&[(a, Currency::USD, 100), (b, Currency::USD, 0)]);

        assert_eq!(
            handler.transfer(&request(a, b, "USD", "one")).await,
            Err(RequestError::InvalidAmount("one".to_string()))
        );
        assert_eq!(
            handler.transfer(&request(a, b, "USD", "0.00")).await,
            Err(RequestError::NonPositiveAmount)
        );
        assert_eq!(
            handler.transfer(&request(a, b, "USD", "-1")).await,
            Err(RequestError::NonPositiveAmount)
        );
        // Below the smallest unit truncates to zero
        assert_eq!(
            handler.transfer(&request(a, b, "USD", "0.009")).await,
            Err(RequestError::NonPositiveAmount)
        );
        assert!(handler.executor().ledger().is_empty());
    }

    #[tokio::test]
    async fn cross_currency_is_refused_without_converter() {
        let (a, b) = (AccountId::random(), AccountId::random());
        let handler = handler_with(&[(a, Currency::EUR, 1_000), (b, Currency::USD, 0)]);

        let result = handler.transfer(&request(a, b, "USD", "1")).await;

        assert!(matches!(
            result,
            Err(RequestError::Conversion(ConversionError::Unsupported { .. }))
        ));
    }

    #[tokio::test]
    async fn cross_currency_uses_converted_source_amount() {
        let (a, b) = (AccountId::random(), AccountId::random());
        let handler = handler_with(&[(a, Currency::EUR, 1_000), (b, Currency::JPY, 0)])
            .with_converter(FixedRate {
                numerator: 1,
                denominator: 2,
            });

        let entry = handler.transfer(&request(a, b, "JPY", "300")).await.unwrap();

        assert_eq!(entry.status(), EntryStatus::Completed);
        assert_eq!(entry.source_amount(), &Amount::from(150));
        assert_eq!(entry.destination_amount(), &Amount::from(300));
        assert_eq!(
            entry.description(),
            format!("Transfer from {a} (1.50 EUR) to {b} (300 JPY) complete")
        );
        assert_eq!(balance(&handler, a).await, Amount::from(850));
        assert_eq!(balance(&handler, b).await, Amount::from(300));
    }

    #[tokio::test]
    async fn conversion_to_zero_is_rejected() {
        let (a, b) = (AccountId::random(), AccountId::random());
        let handler = handler_with(&[(a, Currency::EUR, 1_000), (b, Currency::JPY, 0)])
            .with_converter(FixedRate {
                numerator: 1,
                denominator: 1_000,
            });

        let result = handler.transfer(&request(a, b, "JPY", "5")).await;

        assert_eq!(
            result,
            Err(RequestError::Conversion(ConversionError::NonPositive {
                from: "EUR".to_string(),
                to: "JPY".to_string(),
            }))
        );
        assert!(handler.executor().ledger().is_empty());
    }

    #[tokio::test]
    async fn history_is_paged_newest_first() {
        let (a, b) = (AccountId::random(), AccountId::random());
        let handler = handler_with(&[(a, Currency::USD, 10_000), (b, Currency::USD, 0)]);

        for cents in 1..=5 {
            handler
                .transfer(&request(a, b, "USD", &format!("0.0{cents}")))
                .await
                .unwrap();
        }

        let all = handler.history(b, 0, 10).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|pair| pair[0].timestamp() >= pair[1].timestamp()));

        let page = handler.history(a, 1, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id(), all[1].id());
        assert_eq!(page[1].id(), all[2].id());
    }

    #[tokio::test]
    async fn history_validates_account_and_limit() {
        let a = AccountId::random();
        let handler = handler_with(&[(a, Currency::USD, 0)]);

        assert_eq!(handler.history(a, 0, 0).await, Err(RequestError::InvalidPageLimit));

        let missing = AccountId::random();
        assert_eq!(
            handler.history(missing, 0, 10).await,
            Err(RequestError::AccountNotFound(missing))
        );
        assert!(handler.history(a, 0, 10).await.unwrap().is_empty());
    }
}
