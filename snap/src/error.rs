use thiserror::Error;
use voyager_registration::RegistrationError;
use voyager_store::StoreError;

#[derive(Debug, Error)]
pub enum SnapError {
    #[error("Method not found.")]
    MethodNotFound(String),

    #[error("No LXP address found.")]
    NoAddress,

    #[error("invalid params for {method}: {reason}")]
    InvalidParams { method: String, reason: String },

    #[error("registration endpoint not configured")]
    RegistrarUnavailable,

    #[error("host error: {0}")]
    Host(String),

    #[error("captions error: {0}")]
    Captions(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}
