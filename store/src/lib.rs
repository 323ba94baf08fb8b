//! Snap state storage.
//!
//! The host owns a single opaque key-value blob per snap. Every component
//! reaches it through the [`StateStore`] trait so that the aggregator and the
//! presenter can run without a live host.

pub mod error;
pub mod file;
pub mod state;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use state::StateStore;
