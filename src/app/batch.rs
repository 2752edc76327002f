use std::sync::Arc;

use tokio::fs::File;
use tokio::io::{AsyncWrite, BufWriter};
use tracing::info;

use super::config::LedgerConfig;
use super::error::AppError;
use crate::engine::{TransferExecutor, TransferHandler};
use crate::io::{AccountStream, TransferStream, write_balances, write_ledger};
use crate::storage::{InMemoryAccountStore, InMemoryLedger};
use crate::streaming::{
    AbortOnError, ErrorPolicy, ProcessingSession, SessionReport, SkipErrors, load_accounts,
};

/// Load accounts, apply every transfer, then write final balances to `writer`
///
/// Balances are written even when the error policy stops the transfer
/// stream early; the run still reports the abort as an error.
pub async fn run_batch<W>(config: &LedgerConfig, writer: W) -> Result<SessionReport, AppError>
where
    W: AsyncWrite + Unpin + Send,
{
    if config.abort_on_error {
        process(config, AbortOnError, writer).await
    } else {
        process(config, SkipErrors, writer).await
    }
}

async fn process<P, W>(config: &LedgerConfig, policy: P, writer: W) -> Result<SessionReport, AppError>
where
    P: ErrorPolicy,
    W: AsyncWrite + Unpin + Send,
{
    let mut store = InMemoryAccountStore::new();
    if let Some(timeout) = config.lock_timeout {
        store = store.with_lock_timeout(timeout);
    }
    let store = Arc::new(store);

    let accounts = AccountStream::from_file(&config.accounts).await?;
    if load_accounts(&store, accounts, &policy).await.aborted {
        return Err(AppError::Aborted("account loading"));
    }

    let transfers = TransferStream::from_file(&config.transfers).await?;
    let handler = TransferHandler::new(TransferExecutor::new(
        Arc::clone(&store),
        InMemoryLedger::new(),
    ));
    let session = ProcessingSession::new(handler, policy).with_concurrency(config.concurrency);
    let report = session.process_stream(transfers).await;

    let accounts = store.snapshot().await;
    write_balances(&accounts, writer).await?;

    if let Some(path) = &config.ledger {
        let file = File::create(path).await?;
        write_ledger(&report.entries, &accounts, BufWriter::new(file)).await?;
        info!(path = %path.display(), entries = report.entries.len(), "Ledger written");
    }

    if report.aborted {
        return Err(AppError::Aborted("transfer processing"));
    }
    Ok(report)
}
