use clap::Parser;
use tracing::info;

use ledger::prelude::*;

#[tokio::main]
async fn main() {
    let config = LedgerConfig::from(CliArgs::parse());
    init_logging(DEFAULT_LOG_FILTER);

    CliApp::new("ledger")
        .run(|stdout| async move {
            let report = run_batch(&config, stdout).await?;
            info!(
                completed = report.completed,
                failed = report.failed,
                rejected = report.rejected,
                "Batch finished"
            );
            Ok(())
        })
        .await
}
