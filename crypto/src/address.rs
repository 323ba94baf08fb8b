//! Account address derivation from public keys.

use alloy_primitives::{keccak256, Address};
use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

/// Address of a public key: last 20 bytes of keccak256 over the 64-byte
/// uncompressed point (without the `0x04` tag).
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair_from_seed;

    #[test]
    fn known_vector() {
        // Private key 0x...01 controls the well-known generator address.
        let mut seed = [0u8; 32];
        seed[31] = 1;
        let key = keypair_from_seed(&seed).unwrap();
        let addr = address_of(key.verifying_key());
        assert_eq!(
            addr.to_string().to_lowercase(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }
}
