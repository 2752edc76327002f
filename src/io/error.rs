use std::io;
use thiserror::Error;

use crate::domain::DomainError;
use crate::storage::StorageError;

/// IO-level errors for CSV parsing and output
#[derive(Error, Debug)]
pub enum IoError {
    #[error("CSV async parsing error: {0}")]
    CsvAsync(#[from] csv_async::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid account id: {0:?}")]
    InvalidAccountId(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid amount format: {0:?}")]
    InvalidAmount(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(
            IoError::InvalidAccountId("abc".to_string()).to_string(),
            "Invalid account id: \"abc\""
        );
        assert_eq!(
            IoError::MissingField("currency".to_string()).to_string(),
            "Missing required field: currency"
        );
        assert_eq!(
            IoError::InvalidAmount("1,,0".to_string()).to_string(),
            "Invalid amount format: \"1,,0\""
        );
    }

    #[test]
    fn domain_error_conversion() {
        let io_err = IoError::from(DomainError::NegativeBalance);

        match io_err {
            IoError::Domain(DomainError::NegativeBalance) => {}
            _ => panic!("Expected Domain error variant"),
        }
    }

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let wrapped = IoError::from(io_err);

        match wrapped {
            IoError::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }
    }
}
