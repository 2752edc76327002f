pub mod conversion;
pub mod error;
pub mod executor;
pub mod handler;

// Re-export commonly used types
pub use conversion::{ConversionError, CurrencyConverter, NoConversion};
pub use error::TransferError;
pub use executor::TransferExecutor;
pub use handler::{RequestError, TransferHandler, TransferRequest};
