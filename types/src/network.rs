//! Chain identifiers and well-known token contracts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// LXP token contract on Linea mainnet.
pub const LXP_CONTRACT_ADDRESS: &str = "0xd83af4fbD77f3AB65C3B1Dc4B38D7e67AEcf599A";

/// LXP-L token contract on Linea mainnet.
pub const LXP_L_CONTRACT_ADDRESS: &str = "0x96B3a15257c4983A6fE9073D8C91763433124B82";

/// A chain id as reported by the wallet (`eth_chainId`), hex encoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(String);

impl ChainId {
    /// Linea mainnet, the production chain (59144).
    pub const LINEA_MAINNET: &'static str = "0xe708";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().to_lowercase())
    }

    pub fn linea_mainnet() -> Self {
        Self(Self::LINEA_MAINNET.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether balances can be read straight from the chain.
    pub fn is_production(&self) -> bool {
        self.0 == Self::LINEA_MAINNET
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_chain_is_case_insensitive() {
        assert!(ChainId::new("0xE708").is_production());
        assert!(ChainId::linea_mainnet().is_production());
        assert!(!ChainId::new("0x1").is_production());
        assert!(!ChainId::new("0xe705").is_production());
    }
}
