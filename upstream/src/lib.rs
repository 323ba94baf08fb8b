//! Upstream lookups for Linea Voyager.
//!
//! Every external source sits behind one async call that normalizes the
//! response into a typed result:
//! - Contentful activations (`activationsCard` entries)
//! - Lineascan token balances
//! - Proof-of-Humanity status
//! - OpenBlock XP score
//! - ENS names on the Linea subgraph
//! - Tally governance proposals
//! - `eth_call` against a chain JSON-RPC endpoint
//!
//! The [`Aggregator`] runs them concurrently for one address and substitutes
//! a documented default for every lookup that fails.

pub mod aggregate;
pub mod chain;
pub mod client;
pub mod config;
pub mod contentful;
pub mod ens;
pub mod error;
pub mod explorer;
pub mod http;
pub mod openblock;
pub mod poh;
pub mod source;
pub mod tally;

pub use aggregate::{Aggregator, BalanceSource, FallbackHook, UserData};
pub use chain::{balance_of_calldata, chain_token_balance, ChainReader, JsonRpcChain};
pub use client::HttpJson;
pub use config::UpstreamConfig;
pub use error::FetchError;
pub use http::HttpUpstream;
pub use source::Upstream;
