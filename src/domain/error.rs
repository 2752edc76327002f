use thiserror::Error;

/// Domain-level errors representing business rule violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed amount: {0:?}")]
    MalformedAmount(String),

    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Balance cannot be negative")]
    NegativeBalance,
}
