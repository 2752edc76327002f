pub mod concurrent;
pub mod concurrent_ledger;
pub mod error;
pub mod traits;

// Re-export commonly used types
pub use concurrent::{InMemoryAccountGuard, InMemoryAccountStore};
pub use concurrent_ledger::InMemoryLedger;
pub use error::StorageError;
pub use traits::{AccountGuard, AccountStore, LedgerStore, Page};
