//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for the Voyager domain types.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unknown locale bundle: {0}")]
    UnknownLocale(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
