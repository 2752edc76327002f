use std::future::Future;

use tracing::warn;

use super::error::AppError;

/// Reusable CLI application runner that handles:
/// - Signal handling (SIGINT, SIGTERM, SIGHUP)
/// - Buffered stdout handed to the main function
/// - Exit codes (0 = success, 1 = error, 128 + signal number on a signal)
pub struct CliApp {
    name: String,
}

impl CliApp {
    /// Create a new CLI application runner
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the application, racing it against termination signals
    ///
    /// The main function owns the buffered stdout writer and must flush it.
    /// This function never returns - it calls std::process::exit with the appropriate code
    pub async fn run<F, Fut>(self, main_fn: F) -> !
    where
        F: FnOnce(tokio::io::BufWriter<tokio::io::Stdout>) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let writer = tokio::io::BufWriter::new(tokio::io::stdout());

        tokio::select! {
            result = main_fn(writer) => {
                match result {
                    Ok(()) => std::process::exit(0),
                    Err(e) => {
                        eprintln!("{}: {}", self.name, e);
                        std::process::exit(1);
                    }
                }
            }
            signal_code = wait_for_signal() => {
                std::process::exit(signal_code);
            }
        }
    }
}

/// Resolve with the exit code for the first termination signal received
///
/// Never resolves if signal handlers cannot be installed.
async fn wait_for_signal() -> i32 {
    match listen_for_signals().await {
        Ok(code) => code,
        Err(error) => {
            warn!(%error, "Signal handling unavailable");
            std::future::pending().await
        }
    }
}

#[cfg(unix)]
async fn listen_for_signals() -> std::io::Result<i32> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sighup = signal(SignalKind::hangup())?;

    let code = tokio::select! {
        _ = sigterm.recv() => {
            warn!("Received SIGTERM");
            143 // 128 + 15
        }
        _ = sigint.recv() => {
            warn!("Received SIGINT");
            130 // 128 + 2
        }
        _ = sighup.recv() => {
            warn!("Received SIGHUP");
            129 // 128 + 1
        }
    };
    Ok(code)
}

#[cfg(not(unix))]
async fn listen_for_signals() -> std::io::Result<i32> {
    tokio::signal::ctrl_c().await?;
    warn!("Received Ctrl+C");
    Ok(130)
}
