//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency (clock, host state, upstream APIs, chain, wallet
//! host, ledger) sits behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return deterministic, scriptable values
//! - Record what was asked of them
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod host;
pub mod ledger;
pub mod store;
pub mod upstream;

pub use clock::NullClock;
pub use host::NullHost;
pub use ledger::{NullLedger, NullRegistrar};
pub use store::NullStateStore;
pub use upstream::{NullChain, NullUpstream};
