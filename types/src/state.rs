//! Persisted snap state.
//!
//! The state is an opaque key-value blob owned by the host. It is created
//! empty on install and every update is an additive merge: a field that is
//! absent from the patch keeps its stored value.

use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};

use crate::{Activation, Captions, Proposal};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lxp_address: Option<String>,
    /// Whole LXP tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lxp_balance: Option<U256>,
    /// Whole LXP-L tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lxp_l_balance: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_block_score: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poh_status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activations: Option<Vec<Activation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposals: Option<Vec<Proposal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions: Option<Captions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ens_name: Option<String>,
}

impl SnapState {
    /// Merge `patch` into `self`, keeping every field the patch leaves unset.
    pub fn merge(&mut self, patch: SnapState) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.lxp_address, patch.lxp_address);
        take(&mut self.lxp_balance, patch.lxp_balance);
        take(&mut self.lxp_l_balance, patch.lxp_l_balance);
        take(&mut self.open_block_score, patch.open_block_score);
        take(&mut self.poh_status, patch.poh_status);
        take(&mut self.activations, patch.activations);
        take(&mut self.proposals, patch.proposals);
        take(&mut self.captions, patch.captions);
        take(&mut self.ens_name, patch.ens_name);
    }

    /// Patch that only sets the watched address.
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            lxp_address: Some(address.into()),
            ..Default::default()
        }
    }

    /// Patch that only replaces the caption bundle.
    pub fn with_captions(captions: Captions) -> Self {
        Self {
            captions: Some(captions),
            ..Default::default()
        }
    }

    /// Pending LXP-L: OpenBlock score not yet minted as LXP-L.
    ///
    /// Whole-token amounts are at most `2^256 / 10^18`, far below `2^255`, so
    /// both operands fit a signed word.
    pub fn pending_lxp_l(&self) -> I256 {
        let score = I256::from_raw(U256::from(self.open_block_score.unwrap_or(0)));
        let minted = I256::from_raw(self.lxp_l_balance.unwrap_or_default());
        score - minted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_additive() {
        let mut state = SnapState::with_address("0x1111111111111111111111111111111111111111");
        state.merge(SnapState {
            lxp_balance: Some(U256::from(12)),
            poh_status: Some(true),
            ..Default::default()
        });
        assert_eq!(
            state.lxp_address.as_deref(),
            Some("0x1111111111111111111111111111111111111111")
        );
        assert_eq!(state.lxp_balance, Some(U256::from(12)));

        state.merge(SnapState {
            poh_status: Some(false),
            ..Default::default()
        });
        assert_eq!(state.poh_status, Some(false));
        assert_eq!(state.lxp_balance, Some(U256::from(12)));
    }

    #[test]
    fn pending_is_signed() {
        let state = SnapState {
            open_block_score: Some(100),
            lxp_l_balance: Some(U256::from(140)),
            ..Default::default()
        };
        assert_eq!(state.pending_lxp_l().to_string(), "-40");
        assert_eq!(SnapState::default().pending_lxp_l(), I256::ZERO);
    }

    #[test]
    fn empty_state_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&SnapState::default()).unwrap(), "{}");
    }
}
