//! Nullable ledger and registrar: recorded rows and submissions.

use async_trait::async_trait;
use std::sync::Mutex;
use voyager_registration::{
    Ledger, LedgerError, LedgerRow, Registrar, RegistrationError, RegistrationStatus,
};
use voyager_types::SignedRegistration;

#[derive(Default)]
pub struct NullLedger {
    rows: Mutex<Vec<LedgerRow>>,
    failing: bool,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that rejects every append.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<LedgerRow> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl Ledger for NullLedger {
    async fn append_row(&self, row: &LedgerRow) -> Result<(), LedgerError> {
        if self.failing {
            return Err(LedgerError::Unreachable("ledger offline".into()));
        }
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }
}

/// A [`Registrar`] that records submissions and answers with a fixed status.
pub struct NullRegistrar {
    status: RegistrationStatus,
    submissions: Mutex<Vec<SignedRegistration>>,
}

impl NullRegistrar {
    /// Answer every submission as an HTTP `code` with `message`.
    pub fn new(code: u16, message: &str) -> Self {
        Self {
            status: RegistrationStatus::from_http(code, message),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn submissions(&self) -> Vec<SignedRegistration> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl Registrar for NullRegistrar {
    async fn submit(
        &self,
        request: &SignedRegistration,
    ) -> Result<RegistrationStatus, RegistrationError> {
        self.submissions.lock().unwrap().push(request.clone());
        Ok(self.status.clone())
    }
}
