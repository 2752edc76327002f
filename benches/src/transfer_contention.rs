use chrono::Utc;
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ledger::prelude::*;
use std::sync::Arc;
use tokio::runtime::Runtime;

type Executor = TransferExecutor<Arc<InMemoryAccountStore>, InMemoryLedger>;

const TRANSFERS_PER_TASK: usize = 100;

fn setup(num_accounts: usize) -> (Arc<Executor>, Vec<AccountId>) {
    let store = Arc::new(InMemoryAccountStore::new());
    let ids = (0..num_accounts)
        .map(|_| {
            let account =
                Account::new(AccountId::random(), Currency::USD, Amount::from(1_000_000)).unwrap();
            let id = account.id();
            store.insert(account).unwrap();
            id
        })
        .collect();
    (Arc::new(TransferExecutor::new(store, InMemoryLedger::new())), ids)
}

async fn run_tasks(executor: Arc<Executor>, ids: Vec<AccountId>, num_tasks: usize) {
    let ids = Arc::new(ids);
    let handles: Vec<_> = (0..num_tasks)
        .map(|task| {
            let executor = Arc::clone(&executor);
            let ids = Arc::clone(&ids);
            tokio::spawn(async move {
                for i in 0..TRANSFERS_PER_TASK {
                    let source = ids[(task + i) % ids.len()];
                    let destination = ids[(task + i + 1) % ids.len()];
                    black_box(
                        executor
                            .transfer(
                                Utc::now(),
                                source,
                                Amount::from(1),
                                destination,
                                Amount::from(1),
                                String::new(),
                            )
                            .await
                            .ok(),
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
}

/// Many tasks over a fixed pool of accounts: fewer accounts, more contention
fn bench_account_pool_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("account_pool_contention");
    let runtime = Runtime::new().unwrap();

    for num_accounts in [2, 16, 256] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_accounts),
            &num_accounts,
            |b, &num_accounts| {
                b.to_async(&runtime).iter_batched(
                    || setup(num_accounts),
                    |(executor, ids)| run_tasks(executor, ids, 16),
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Opposing directions on one pair: the lock-ordering worst case
fn bench_opposing_pair(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();

    c.bench_function("opposing_pair", |b| {
        b.to_async(&runtime).iter_batched(
            || setup(2),
            |(executor, ids)| async move {
                let reversed = vec![ids[1], ids[0]];
                let forward = tokio::spawn(run_tasks(Arc::clone(&executor), ids, 4));
                let backward = tokio::spawn(run_tasks(executor, reversed, 4));
                forward.await.unwrap();
                backward.await.unwrap();
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_amount_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("amount_codec");

    group.bench_function("parse", |b| {
        b.iter(|| parse_amount(black_box("1,234,567.8901"), black_box(2)))
    });

    let amount = Amount::from(123_456_789);
    group.bench_function("format", |b| b.iter(|| format_amount(black_box(&amount), black_box(2))));

    group.finish();
}

criterion_group!(
    benches,
    bench_account_pool_contention,
    bench_opposing_pair,
    bench_amount_codec
);
criterion_main!(benches);
