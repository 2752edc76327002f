//! Atomic two-account transfers over arbitrary-precision balances
//!
//! Layers, bottom up:
//! - [`domain`]: amounts and their decimal codec, currencies, accounts, ledger entries
//! - [`storage`]: account and ledger stores behind traits, with in-memory backends
//! - [`engine`]: the lock-ordered transfer executor and the request handler above it
//! - [`io`] and [`streaming`]: CSV batch input and output
//! - [`app`]: the command-line runner

pub mod app;
pub mod domain;
pub mod engine;
pub mod io;
pub mod prelude;
pub mod storage;
pub mod streaming;
