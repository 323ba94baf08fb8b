//! Wallet `personal_sign` signatures (EIP-191, recoverable secp256k1).
//!
//! Wire form: `0x` + hex(r ‖ s ‖ v), 65 bytes, with `v` either 27/28 or 0/1.

use alloy_primitives::{eip191_hash_message, Address};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use voyager_types::UserAddress;

use crate::{address_of, CryptoError};

const SIGNATURE_LEN: usize = 65;

/// Sign `message` the way a wallet's `personal_sign` does.
pub fn sign_personal_message(message: &[u8], key: &SigningKey) -> Result<String, CryptoError> {
    let digest = eip191_hash_message(message);
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(digest.as_slice())
        .map_err(|e| CryptoError::Signing(e.to_string()))?;

    let mut bytes = Vec::with_capacity(SIGNATURE_LEN);
    bytes.extend_from_slice(&signature.to_bytes());
    bytes.push(27 + recovery_id.to_byte());
    Ok(format!("0x{}", hex::encode(bytes)))
}

/// Recover the address that produced `signature` over `message`.
pub fn recover_personal_signer(message: &[u8], signature: &str) -> Result<Address, CryptoError> {
    let raw = signature.strip_prefix("0x").unwrap_or(signature);
    let bytes = hex::decode(raw).map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
    if bytes.len() != SIGNATURE_LEN {
        return Err(CryptoError::MalformedSignature(format!(
            "expected {SIGNATURE_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let mut sig = Signature::from_slice(&bytes[..64])
        .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
    let v = match bytes[64] {
        v @ 27..=28 => v - 27,
        v @ 0..=1 => v,
        other => {
            return Err(CryptoError::MalformedSignature(format!(
                "invalid recovery byte {other}"
            )))
        }
    };
    let mut recovery_id = RecoveryId::from_byte(v)
        .ok_or_else(|| CryptoError::MalformedSignature(format!("invalid recovery byte {v}")))?;

    // High-s signatures are valid on the wire; flip them to the low-s twin.
    if let Some(normalized) = sig.normalize_s() {
        sig = normalized;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }

    let digest = eip191_hash_message(message);
    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id)
        .map_err(|e| CryptoError::Recovery(e.to_string()))?;
    Ok(address_of(&key))
}

/// Check that `signature` over `message` was produced by `expected`.
///
/// A malformed signature is an error; a well-formed signature from another
/// signer is `Ok(false)`.
pub fn verify_personal_signature(
    message: &[u8],
    signature: &str,
    expected: &UserAddress,
) -> Result<bool, CryptoError> {
    let signer = recover_personal_signer(message, signature)?;
    Ok(expected.matches(&signer))
}
