use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("signer recovery failed: {0}")]
    Recovery(String),

    #[error("signing failed: {0}")]
    Signing(String),
}
