use std::borrow::Cow;
use std::fmt;

use super::amount::{Amount, format_amount, parse_amount};
use super::error::DomainError;

/// A currency code together with its minor-unit digit count
///
/// The digit count is the only property the codec needs; there is no
/// per-currency behaviour beyond it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency {
    code: Cow<'static, str>,
    minor_digits: u32,
}

impl Currency {
    pub const USD: Currency = Currency::known("USD", 2);
    pub const EUR: Currency = Currency::known("EUR", 2);
    pub const JPY: Currency = Currency::known("JPY", 0);

    /// Digit count used for codes outside the known table
    pub const DEFAULT_MINOR_DIGITS: u32 = 2;

    const fn known(code: &'static str, minor_digits: u32) -> Self {
        Self {
            code: Cow::Borrowed(code),
            minor_digits,
        }
    }

    pub fn new(code: impl Into<String>, minor_digits: u32) -> Self {
        Self {
            code: Cow::Owned(code.into()),
            minor_digits,
        }
    }

    /// Resolve a code to a known currency, falling back to a two-digit one
    pub fn lookup(code: &str) -> Self {
        match code {
            "USD" => Self::USD,
            "EUR" => Self::EUR,
            "JPY" => Self::JPY,
            other => Self::new(other, Self::DEFAULT_MINOR_DIGITS),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn minor_digits(&self) -> u32 {
        self.minor_digits
    }

    pub fn parse_amount(&self, text: &str) -> Result<Amount, DomainError> {
        parse_amount(text, self.minor_digits)
    }

    pub fn format_amount(&self, amount: &Amount) -> String {
        format_amount(amount, self.minor_digits)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
