use clap::Parser;
use std::path::PathBuf;

/// Apply a batch of two-account transfers to a set of accounts
#[derive(Parser, Debug)]
#[command(name = "ledger")]
#[command(about = "Apply a batch of two-account transfers to a set of accounts", long_about = None)]
pub struct CliArgs {
    /// Accounts CSV: account,currency,balance
    #[arg(value_name = "ACCOUNTS")]
    pub accounts: PathBuf,

    /// Transfers CSV: source,destination,currency,amount
    #[arg(value_name = "TRANSFERS")]
    pub transfers: PathBuf,

    /// Also write every ledger entry to this CSV file
    #[arg(long = "ledger", value_name = "PATH")]
    pub ledger: Option<PathBuf>,

    /// Maximum number of transfers in flight
    #[arg(long = "concurrency", value_name = "COUNT", default_value_t = crate::streaming::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Give up on a transfer after waiting this long for an account lock
    #[arg(long = "lock-timeout-ms", value_name = "MS")]
    pub lock_timeout_ms: Option<u64>,

    /// Stop at the first unreadable row or rejected transfer
    #[arg(long = "abort-on-error")]
    pub abort_on_error: bool,
}
