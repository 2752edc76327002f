use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Amount, Currency};

/// Conversion failures reported by a [`CurrencyConverter`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("No conversion available from {from} to {to}")]
    Unsupported { from: String, to: String },

    #[error("Conversion from {from} to {to} produced a non-positive amount")]
    NonPositive { from: String, to: String },

    #[error("Conversion failed: {0}")]
    Failed(String),
}

/// Resolves how much of one currency pays for an amount of another
///
/// Given `amount` in `to`, returns the equivalent amount in `from`, in
/// `from`'s minor units.
#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    async fn convert(
        &self,
        amount: &Amount,
        from: &Currency,
        to: &Currency,
    ) -> Result<Amount, ConversionError>;
}

/// Converter for deployments with single-currency transfers only
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConversion;

#[async_trait]
impl CurrencyConverter for NoConversion {
    async fn convert(
        &self,
        _amount: &Amount,
        from: &Currency,
        to: &Currency,
    ) -> Result<Amount, ConversionError> {
        Err(ConversionError::Unsupported {
            from: from.code().to_string(),
            to: to.code().to_string(),
        })
    }
}
