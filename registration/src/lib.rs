//! Address registration.
//!
//! A client signs `{address, signedOn, subject}` with the wallet's
//! `personal_sign`. The server recovers the signer, checks it against
//! `payload.address` and appends one row to an external ledger. Rows are
//! never updated or deleted; resubmitting appends a duplicate.

pub mod client;
pub mod error;
pub mod ledger;
pub mod service;
pub mod sheets;

pub use client::{Registrar, RegistrationClient, RegistrationStatus, STATUS_ERROR, STATUS_OK};
pub use error::{LedgerError, RegistrationError};
pub use ledger::{Ledger, LedgerRow};
pub use service::{RegistrationReceipt, RegistrationService};
pub use sheets::SheetsLedger;
