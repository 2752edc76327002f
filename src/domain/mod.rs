pub mod account;
pub mod amount;
pub mod currency;
pub mod entry;
pub mod error;
pub mod operations;

// Re-export commonly used types
pub use account::{Account, AccountId};
pub use amount::{Amount, format_amount, parse_amount};
pub use currency::Currency;
pub use entry::{EntryId, EntryStatus, INSUFFICIENT_BALANCE, LedgerEntry};
pub use error::DomainError;
pub use operations::{apply_credit, apply_debit};
