//! Watched account address.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A hexadecimal account address, `0x` followed by exactly 40 hex digits.
///
/// The original spelling is preserved so that a value written by the user is
/// read back unchanged; [`UserAddress::to_checksum`] gives the EIP-55 form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserAddress(String);

impl UserAddress {
    /// Total length of a well-formed address including the `0x` prefix.
    pub const LEN: usize = 42;

    /// Parse and validate a candidate address.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        if Self::is_valid(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(TypesError::InvalidAddress(raw.to_string()))
        }
    }

    /// Check a candidate against the strict `^0x[0-9a-fA-F]{40}$` pattern.
    pub fn is_valid(raw: &str) -> bool {
        raw.len() == Self::LEN
            && raw.starts_with("0x")
            && raw[2..].bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Return the address exactly as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form, as expected by indexers and subgraphs.
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    /// EIP-55 mixed-case checksum form.
    pub fn to_checksum(&self) -> String {
        self.to_alloy().to_checksum(None)
    }

    /// The 40 hex digits without the `0x` prefix.
    pub fn hex_digits(&self) -> &str {
        &self.0[2..]
    }

    pub fn to_alloy(&self) -> Address {
        // Validated on construction.
        Address::from_str(&self.0).unwrap_or_default()
    }

    /// Case-insensitive comparison against another address.
    pub fn matches(&self, other: &Address) -> bool {
        self.to_alloy() == *other
    }
}

impl fmt::Display for UserAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UserAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<UserAddress> for String {
    fn from(addr: UserAddress) -> Self {
        addr.0
    }
}
