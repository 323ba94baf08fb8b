//! Token balances.
//!
//! Balances arrive as raw integer token units, either as a decimal string
//! (explorer API) or as a `0x`-prefixed hex word (`eth_call` result). They are
//! shown to the user as whole tokens: divided by 10^18 and truncated.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimals of the LXP / LXP-L tokens.
pub const TOKEN_DECIMALS: u8 = 18;

/// A raw token balance exactly as returned by an upstream source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawBalance(String);

impl RawBalance {
    /// The balance used when a lookup is skipped or fails.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whole tokens, see [`convert_balance_to_display`].
    pub fn to_display(&self) -> U256 {
        convert_balance_to_display(Some(&self.0))
    }
}

impl fmt::Display for RawBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert a raw balance to whole tokens: `floor(uint(raw) / 10^18)`.
///
/// Missing, empty, `"0x"` and unparsable inputs all yield `0`.
pub fn convert_balance_to_display(raw: Option<&str>) -> U256 {
    let Some(raw) = raw.map(str::trim) else {
        return U256::ZERO;
    };

    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some("") => return U256::ZERO,
        Some(hex) => U256::from_str_radix(hex, 16),
        None if raw.is_empty() => return U256::ZERO,
        None => U256::from_str_radix(raw, 10),
    };

    let Ok(units) = parsed else {
        return U256::ZERO;
    };
    units / U256::from(10u128.pow(u32::from(TOKEN_DECIMALS)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_empty_are_zero() {
        assert_eq!(convert_balance_to_display(None), U256::from(0));
        assert_eq!(convert_balance_to_display(Some("")), U256::from(0));
        assert_eq!(convert_balance_to_display(Some("0x")), U256::from(0));
        assert_eq!(convert_balance_to_display(Some("0")), U256::from(0));
    }

    #[test]
    fn decimal_balance_truncates() {
        assert_eq!(convert_balance_to_display(Some("1999999999999999999")), U256::from(1));
        assert_eq!(convert_balance_to_display(Some("2000000000000000000")), U256::from(2));
        assert_eq!(convert_balance_to_display(Some("999999999999999999")), U256::from(0));
    }

    #[test]
    fn hex_word_from_eth_call() {
        // 5 * 10^18 = 0x4563918244f40000, left-padded to a 32-byte word.
        let word = format!("0x{:0>64}", "4563918244f40000");
        assert_eq!(convert_balance_to_display(Some(&word)), U256::from(5));
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(convert_balance_to_display(Some("not a number")), U256::from(0));
        assert_eq!(convert_balance_to_display(Some("0xzz")), U256::from(0));
    }

    #[test]
    fn full_width_words_do_not_saturate() {
        let word = format!("0x{}", "f".repeat(64));
        let expected = U256::MAX / U256::from(10u128.pow(18));
        assert_eq!(convert_balance_to_display(Some(&word)), expected);
        assert!(expected > U256::from(u128::MAX));
    }

    #[test]
    fn raw_balance_helpers() {
        assert_eq!(RawBalance::zero().to_display(), U256::from(0));
        assert_eq!(RawBalance::new("42000000000000000000").to_display(), U256::from(42));
        assert_eq!(
            serde_json::to_string(&RawBalance::new("7")).unwrap(),
            "\"7\""
        );
    }
}
