//! Upstream fetch errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("call to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("{0} API key not set")]
    MissingKey(&'static str),

    #[error("JSON-RPC error: {0}")]
    Rpc(String),
}
