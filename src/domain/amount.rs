use std::fmt;
use std::ops::{Add, Sub};

use num_bigint::{BigInt, Sign};

use super::error::DomainError;

/// Exact monetary amount in a currency's minor units (cents, yen, ...)
///
/// Arbitrary precision: balances never overflow and never pass through
/// floating point.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(BigInt);

impl Amount {
    /// Create from a raw minor-unit value
    pub fn from_minor(value: impl Into<BigInt>) -> Self {
        Self(value.into())
    }

    /// Raw minor-unit value
    pub fn minor_units(&self) -> &BigInt {
        &self.0
    }

    pub fn zero() -> Self {
        Self(BigInt::default())
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// Parse a decimal literal into minor units, see [`parse_amount`]
    pub fn parse(text: &str, minor_digits: u32) -> Result<Self, DomainError> {
        parse_amount(text, minor_digits)
    }

    /// Render as a decimal literal, see [`format_amount`]
    pub fn format(&self, minor_digits: u32) -> String {
        format_amount(self, minor_digits)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl Add for &Amount {
    type Output = Amount;

    fn add(self, other: Self) -> Amount {
        Amount(&self.0 + &other.0)
    }
}

impl Sub for &Amount {
    type Output = Amount;

    fn sub(self, other: Self) -> Amount {
        Amount(&self.0 - &other.0)
    }
}

/// Displays the raw minor-unit integer
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Parse a decimal literal into an exact minor-unit amount.
///
/// Accepted grammar (surrounding whitespace ignored):
/// `-? digits (',' digits)* ('.' digits)?`
///
/// The value is scaled by `10^minor_digits` and any digits below one minor
/// unit are truncated toward zero, never rounded: `("2.0099", 2)` is `200`.
pub fn parse_amount(text: &str, minor_digits: u32) -> Result<Amount, DomainError> {
    let malformed = || DomainError::MalformedAmount(text.to_string());

    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (integer_part, fraction_part) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let scale = minor_digits as usize;
    let mut digits = String::with_capacity(integer_part.len() + scale);

    for group in integer_part.split(',') {
        if !is_digits(group) {
            return Err(malformed());
        }
        digits.push_str(group);
    }

    let fraction = match fraction_part {
        Some(fraction) if is_digits(fraction) => fraction,
        Some(_) => return Err(malformed()),
        None => "",
    };

    // Fraction is ASCII digits only, so byte slicing is safe
    let kept = &fraction[..fraction.len().min(scale)];
    digits.push_str(kept);
    digits.extend(std::iter::repeat_n('0', scale - kept.len()));

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(malformed)?;

    Ok(Amount(if negative { -magnitude } else { magnitude }))
}

/// Render a minor-unit amount as a plain decimal literal.
///
/// The decimal point sits `minor_digits` places from the right and is omitted
/// for zero-digit currencies. No grouping separators, no rounding.
pub fn format_amount(amount: &Amount, minor_digits: u32) -> String {
    let digits = amount.0.magnitude().to_string();
    let sign = if amount.is_negative() { "-" } else { "" };
    let scale = minor_digits as usize;

    if scale == 0 {
        return format!("{sign}{digits}");
    }

    let padded = format!("{:0>width$}", digits, width = scale + 1);
    let (integer, fraction) = padded.split_at(padded.len() - scale);
    format!("{sign}{integer}.{fraction}")
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
