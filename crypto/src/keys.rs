//! secp256k1 key handling.

use k256::ecdsa::SigningKey;

use crate::CryptoError;

/// Derive a signing key from a 32-byte seed (deterministic).
///
/// Fails for the zero scalar and for seeds at or above the curve order.
pub fn keypair_from_seed(seed: &[u8; 32]) -> Result<SigningKey, CryptoError> {
    SigningKey::from_slice(seed).map_err(|_| CryptoError::InvalidPrivateKey)
}
