use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::{Stream, StreamExt, future};
use tracing::{debug, info};

use super::error::ErrorPolicy;
use crate::domain::{Account, EntryStatus, LedgerEntry};
use crate::engine::{CurrencyConverter, TransferHandler, TransferRequest};
use crate::io::IoError;
use crate::storage::{AccountStore, InMemoryAccountStore, LedgerStore};

/// Requests in flight per session unless configured otherwise
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Outcome of loading an account stream into a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub rejected: usize,
    pub aborted: bool,
}

/// Register every account of the stream with the store
pub async fn load_accounts<St, P>(store: &InMemoryAccountStore, stream: St, policy: &P) -> LoadReport
where
    St: Stream<Item = Result<Account, IoError>>,
    P: ErrorPolicy,
{
    let mut report = LoadReport::default();
    let mut stream = pin!(stream);

    while let Some(result) = stream.next().await {
        let outcome = result.and_then(|account| store.insert(account).map_err(IoError::from));
        match outcome {
            Ok(()) => report.loaded += 1,
            Err(e) => {
                report.rejected += 1;
                if !policy.handle_io_error(e) {
                    report.aborted = true;
                    break;
                }
            }
        }
    }

    info!(loaded = report.loaded, rejected = report.rejected, "Accounts loaded");
    report
}

/// Outcome of a processing session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Recorded entries, in completion order
    pub entries: Vec<LedgerEntry>,
    pub completed: usize,
    /// Insufficient balance: recorded, nothing moved
    pub failed: usize,
    /// Unreadable rows and refused requests: nothing recorded
    pub rejected: usize,
    pub aborted: bool,
}

impl SessionReport {
    fn record(&mut self, entry: LedgerEntry) {
        match entry.status() {
            EntryStatus::Completed => self.completed += 1,
            EntryStatus::Failed => self.failed += 1,
        }
        self.entries.push(entry);
    }
}

/// Drives a stream of transfer requests through a handler
pub struct ProcessingSession<S, L, C, P>
where
    S: AccountStore,
    L: LedgerStore,
    C: CurrencyConverter,
    P: ErrorPolicy,
{
    handler: TransferHandler<S, L, C>,
    error_policy: P,
    concurrency: usize,
}

impl<S, L, C, P> ProcessingSession<S, L, C, P>
where
    S: AccountStore,
    L: LedgerStore,
    C: CurrencyConverter,
    P: ErrorPolicy,
{
    /// Create a new processing session
    pub fn new(handler: TransferHandler<S, L, C>, error_policy: P) -> Self {
        Self {
            handler,
            error_policy,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Number of requests in flight at once (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Process a stream of transfer requests
    ///
    /// Up to `concurrency` requests run at once; transfers touching disjoint
    /// accounts proceed in parallel while the executor serializes the rest.
    /// When the error policy aborts, no further request is started but those
    /// already in flight run to their outcome and are reported.
    pub async fn process_stream<St>(&self, stream: St) -> SessionReport
    where
        St: Stream<Item = Result<TransferRequest, IoError>>,
    {
        let stopped = AtomicBool::new(false);
        let handler = &self.handler;
        let outcomes = stream
            .take_while(|_| future::ready(!stopped.load(Ordering::Relaxed)))
            .map(|item| async move {
                match item {
                    Ok(request) => Ok(handler.transfer(&request).await),
                    Err(e) => Err(e),
                }
            })
            .buffer_unordered(self.concurrency);
        let mut outcomes = pin!(outcomes);

        let mut report = SessionReport::default();
        while let Some(outcome) = outcomes.next().await {
            let keep_going = match outcome {
                Ok(Ok(entry)) => {
                    report.record(entry);
                    true
                }
                Ok(Err(e)) if report.aborted => {
                    debug!(error = %e, "Rejected while draining");
                    report.rejected += 1;
                    true
                }
                Ok(Err(e)) => {
                    report.rejected += 1;
                    self.error_policy.handle_request_error(e)
                }
                Err(e) if report.aborted => {
                    debug!(error = %e, "Unreadable while draining");
                    report.rejected += 1;
                    true
                }
                Err(e) => {
                    report.rejected += 1;
                    self.error_policy.handle_io_error(e)
                }
            };

            if !keep_going {
                debug!(processed = report.entries.len(), "Session aborted by error policy");
                report.aborted = true;
                stopped.store(true, Ordering::Relaxed);
            }
        }

        info!(
            completed = report.completed,
            failed = report.failed,
            rejected = report.rejected,
            aborted = report.aborted,
            "Session finished"
        );
        report
    }

    pub fn handler(&self) -> &TransferHandler<S, L, C> {
        &self.handler
    }

    /// Consume the session and return the handler
    pub fn into_handler(self) -> TransferHandler<S, L, C> {
        self.handler
    }
}
