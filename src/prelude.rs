//! Prelude module for convenient imports
//!
//! Import everything you need with: `use ledger::prelude::*;`

// Domain types
pub use crate::domain::{
    Account, AccountId, Amount, Currency, DomainError, EntryId, EntryStatus, LedgerEntry,
    format_amount, parse_amount,
};

// Storage types
pub use crate::storage::{
    AccountGuard, AccountStore, InMemoryAccountStore, InMemoryLedger, LedgerStore, Page,
    StorageError,
};

// Engine types
pub use crate::engine::{
    ConversionError, CurrencyConverter, NoConversion, RequestError, TransferError,
    TransferExecutor, TransferHandler, TransferRequest,
};

// IO types
pub use crate::io::{AccountStream, IoError, TransferStream, write_balances, write_ledger};

// Streaming types
pub use crate::streaming::{
    AbortOnError, ErrorPolicy, ProcessingSession, SessionReport, SilentSkip, SkipErrors,
    load_accounts,
};

// App types
pub use crate::app::{
    AppError, CliApp, CliArgs, DEFAULT_LOG_FILTER, LedgerConfig, init_logging, run_batch,
};
