use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::IoError;
use crate::domain::{Account, AccountId, Currency};
use crate::engine::TransferRequest;

/// A typed value built from one CSV row
pub trait CsvRecord: Sized + Send + 'static {
    /// Row shape as deserialized by the CSV reader
    type Raw: DeserializeOwned + Send + 'static;

    fn parse(raw: Self::Raw) -> Result<Self, IoError>;
}

/// Raw account row: `account,currency,balance`
#[derive(Debug, Deserialize)]
pub struct RawAccountRecord {
    pub account: String,
    pub currency: Option<String>,
    pub balance: Option<String>,
}

/// Raw transfer row: `source,destination,currency,amount`
#[derive(Debug, Deserialize)]
pub struct RawTransferRecord {
    pub source: String,
    pub destination: String,
    pub currency: Option<String>,
    pub amount: Option<String>,
}

impl CsvRecord for Account {
    type Raw = RawAccountRecord;

    fn parse(raw: RawAccountRecord) -> Result<Self, IoError> {
        let id = parse_account_id(&raw.account)?;
        let currency = Currency::lookup(&required(raw.currency, "currency")?);
        let balance_str = required(raw.balance, "balance")?;
        let balance = currency
            .parse_amount(&balance_str)
            .map_err(|_| IoError::InvalidAmount(balance_str))?;

        Ok(Account::new(id, currency, balance)?)
    }
}

impl CsvRecord for TransferRequest {
    type Raw = RawTransferRecord;

    fn parse(raw: RawTransferRecord) -> Result<Self, IoError> {
        // Amount stays textual; it is parsed against the destination currency
        Ok(TransferRequest {
            source: parse_account_id(&raw.source)?,
            destination: parse_account_id(&raw.destination)?,
            currency: required(raw.currency, "currency")?,
            amount: required(raw.amount, "amount")?,
        })
    }
}

fn parse_account_id(text: &str) -> Result<AccountId, IoError> {
    text.trim()
        .parse()
        .map_err(|_| IoError::InvalidAccountId(text.to_string()))
}

fn required(field: Option<String>, name: &str) -> Result<String, IoError> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| IoError::MissingField(name.to_string()))
}
