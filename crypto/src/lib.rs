//! Cryptographic primitives for Linea Voyager.
//!
//! - **secp256k1 ECDSA** recoverable signatures (wallet `personal_sign`)
//! - **EIP-191** message hashing
//! - Address derivation: last 20 bytes of keccak256 of the uncompressed public key

pub mod address;
pub mod error;
pub mod keys;
pub mod sign;

pub use address::address_of;
pub use error::CryptoError;
pub use keys::keypair_from_seed;
pub use sign::{recover_personal_signer, sign_personal_message, verify_personal_signature};
