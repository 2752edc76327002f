use tracing::{error, warn};

use crate::engine::RequestError;
use crate::io::IoError;

/// Policy for handling errors during stream processing
pub trait ErrorPolicy: Send + Sync {
    /// Handle an IO error (CSV parsing, reading, loading)
    /// Return true to continue processing, false to abort
    fn handle_io_error(&self, error: IoError) -> bool;

    /// Handle a rejected transfer request
    /// Return true to continue processing, false to abort
    fn handle_request_error(&self, error: RequestError) -> bool;
}

/// Skip errors and continue processing (logged as warnings)
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipErrors;

impl ErrorPolicy for SkipErrors {
    fn handle_io_error(&self, error: IoError) -> bool {
        warn!(%error, "Skipping unreadable record");
        true
    }

    fn handle_request_error(&self, error: RequestError) -> bool {
        warn!(%error, "Skipping rejected transfer");
        true
    }
}

/// Abort on first error
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortOnError;

impl ErrorPolicy for AbortOnError {
    fn handle_io_error(&self, error: IoError) -> bool {
        error!(%error, "Aborting on unreadable record");
        false
    }

    fn handle_request_error(&self, error: RequestError) -> bool {
        error!(%error, "Aborting on rejected transfer");
        false
    }
}

/// Silent error policy - skip errors without logging
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSkip;

impl ErrorPolicy for SilentSkip {
    fn handle_io_error(&self, _error: IoError) -> bool {
        true
    }

    fn handle_request_error(&self, _error: RequestError) -> bool {
        true
    }
}
