use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger unreachable: {0}")]
    Unreachable(String),

    #[error("ledger rejected the row with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Missing signature")]
    MissingSignature,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("{0} not set")]
    MissingSecret(&'static str),

    #[error("Failed to store registration: {0}")]
    Ledger(#[from] LedgerError),

    #[error("registration endpoint unreachable: {0}")]
    Transport(String),
}

impl RegistrationError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingSignature | Self::InvalidPayload(_) | Self::InvalidSignature => 400,
            Self::MissingSecret(_) | Self::Ledger(_) | Self::Transport(_) => 500,
        }
    }
}
