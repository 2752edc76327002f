pub mod csv_reader;
pub mod csv_writer;
pub mod error;
pub mod parse;

// Re-export commonly used types
pub use csv_reader::{AccountStream, CsvRecordStream, TransferStream};
pub use csv_writer::{write_balances, write_ledger};
pub use error::IoError;
pub use parse::{CsvRecord, RawAccountRecord, RawTransferRecord};
