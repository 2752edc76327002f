pub mod args;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use args::CliArgs;
pub use batch::run_batch;
pub use cli::CliApp;
pub use config::LedgerConfig;
pub use error::AppError;
pub use logging::{DEFAULT_LOG_FILTER, init_logging};
