use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::streaming::DEFAULT_CONCURRENCY;

/// Everything a batch run needs, independent of how it was supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub accounts: PathBuf,
    pub transfers: PathBuf,
    pub ledger: Option<PathBuf>,
    pub concurrency: usize,
    pub lock_timeout: Option<Duration>,
    pub abort_on_error: bool,
}

impl LedgerConfig {
    pub fn new(accounts: impl Into<PathBuf>, transfers: impl Into<PathBuf>) -> Self {
        Self {
            accounts: accounts.into(),
            transfers: transfers.into(),
            ledger: None,
            concurrency: DEFAULT_CONCURRENCY,
            lock_timeout: None,
            abort_on_error: false,
        }
    }

    pub fn with_ledger(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger = Some(path.into());
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }

    pub fn with_abort_on_error(mut self, enabled: bool) -> Self {
        self.abort_on_error = enabled;
        self
    }
}

impl From<CliArgs> for LedgerConfig {
    fn from(args: CliArgs) -> Self {
        let mut config = LedgerConfig::new(args.accounts, args.transfers)
            .with_concurrency(args.concurrency)
            .with_abort_on_error(args.abort_on_error);
        if let Some(path) = args.ledger {
            config = config.with_ledger(path);
        }
        if let Some(ms) = args.lock_timeout_ms {
            config = config.with_lock_timeout(Duration::from_millis(ms));
        }
        config
    }
}
