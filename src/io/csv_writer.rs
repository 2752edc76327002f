use std::collections::HashMap;

use csv_async::AsyncWriter;
use tokio::io::AsyncWrite;
use tokio_util::compat::TokioAsyncWriteCompatExt;

use super::error::IoError;
use crate::domain::{Account, AccountId, Amount, Currency, LedgerEntry};

/// Write final balances as `account,currency,balance`
pub async fn write_balances<W>(accounts: &[Account], writer: W) -> Result<(), IoError>
where
    W: AsyncWrite + Unpin + Send,
{
    let mut csv = AsyncWriter::from_writer(writer.compat_write());
    csv.write_record(["account", "currency", "balance"]).await?;

    for account in accounts {
        csv.write_record([
            account.id().to_string(),
            account.currency().code().to_string(),
            account.formatted_balance(),
        ])
        .await?;
    }

    csv.flush().await?;
    Ok(())
}

/// Write ledger entries, formatting each leg with its account's currency
///
/// Legs whose account is not in `accounts` fall back to raw minor units.
pub async fn write_ledger<W>(
    entries: &[LedgerEntry],
    accounts: &[Account],
    writer: W,
) -> Result<(), IoError>
where
    W: AsyncWrite + Unpin + Send,
{
    let currencies: HashMap<AccountId, &Currency> = accounts
        .iter()
        .map(|account| (account.id(), account.currency()))
        .collect();
    let render = |id: AccountId, amount: &Amount| match currencies.get(&id) {
        Some(currency) => currency.format_amount(amount),
        None => amount.to_string(),
    };

    let mut csv = AsyncWriter::from_writer(writer.compat_write());
    csv.write_record([
        "id",
        "status",
        "timestamp",
        "source",
        "source_amount",
        "source_balance",
        "destination",
        "destination_amount",
        "destination_balance",
        "description",
    ])
    .await?;

    for entry in entries {
        let source = entry.source_account_id();
        let destination = entry.destination_account_id();
        csv.write_record([
            entry.id().to_string(),
            entry.status().to_string(),
            entry.timestamp().to_rfc3339(),
            source.to_string(),
            render(source, entry.source_amount()),
            render(source, entry.source_balance_after()),
            destination.to_string(),
            render(destination, entry.destination_amount()),
            render(destination, entry.destination_balance_after()),
            entry.description().to_string(),
        ])
        .await?;
    }

    csv.flush().await?;
    Ok(())
}
