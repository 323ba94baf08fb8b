//! Append-only registration ledger.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// One registration, in column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    /// RFC 3339 time the row was accepted.
    pub timestamp: String,
    pub address: String,
    pub signed_on: String,
    pub subject: String,
    pub signature: String,
}

impl LedgerRow {
    pub fn values(&self) -> [&str; 5] {
        [
            &self.timestamp,
            &self.address,
            &self.signed_on,
            &self.subject,
            &self.signature,
        ]
    }
}

#[async_trait]
pub trait Ledger: Send + Sync {
    async fn append_row(&self, row: &LedgerRow) -> Result<(), LedgerError>;
}
