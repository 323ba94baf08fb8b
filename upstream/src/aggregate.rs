//! Concurrent, fail-soft aggregation of every upstream lookup.
//!
//! Each lookup settles independently. A failed lookup is logged at `warn`
//! and replaced by its documented default:
//!
//! | field | default |
//! |---|---|
//! | activations, proposals | empty list |
//! | pohStatus | `false` |
//! | openBlockScore | `0` |
//! | lxpBalance, lxpLBalance | `"0"` |
//! | name | absent |

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use voyager_store::{StateStore, StoreError};
use voyager_types::{
    filter_active_proposals, filter_current_activations, Activation, Proposal, RawBalance,
    SnapState, UserAddress, GET_XP_TAG, LXP_CONTRACT_ADDRESS, LXP_L_CONTRACT_ADDRESS,
};
use voyager_utils::Clock;

use crate::{chain_token_balance, ChainReader, FetchError, Upstream};

/// Called with the fetch label every time a default is substituted.
pub type FallbackHook = Arc<dyn Fn(&'static str) + Send + Sync>;

/// Where token balances (and names) come from for one aggregation.
#[derive(Clone, Copy)]
pub enum BalanceSource<'a> {
    /// Read the token contracts directly (`eth_call`).
    Chain(&'a dyn ChainReader),
    /// Ask the block explorer.
    Explorer,
    /// Do not look balances or names up; balances are `"0"`, name absent.
    Skip,
}

/// Combined user record, as served by the global endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub activations: Vec<Activation>,
    pub poh_status: bool,
    pub open_block_score: u64,
    pub lxp_balance: RawBalance,
    pub lxp_l_balance: RawBalance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub proposals: Vec<Proposal>,
}

impl UserData {
    /// State patch with balances converted to whole tokens.
    pub fn into_patch(self) -> SnapState {
        SnapState {
            lxp_balance: Some(self.lxp_balance.to_display()),
            lxp_l_balance: Some(self.lxp_l_balance.to_display()),
            open_block_score: Some(self.open_block_score),
            poh_status: Some(self.poh_status),
            activations: Some(self.activations),
            proposals: Some(self.proposals),
            ens_name: self.name,
            ..Default::default()
        }
    }
}

pub struct Aggregator {
    upstream: Arc<dyn Upstream>,
    clock: Arc<dyn Clock>,
    xp_tag: String,
    on_fallback: Option<FallbackHook>,
}

impl Aggregator {
    pub fn new(upstream: Arc<dyn Upstream>, clock: Arc<dyn Clock>) -> Self {
        Self {
            upstream,
            clock,
            xp_tag: GET_XP_TAG.to_string(),
            on_fallback: None,
        }
    }

    pub fn with_xp_tag(mut self, tag: impl Into<String>) -> Self {
        self.xp_tag = tag.into();
        self
    }

    pub fn with_fallback_hook(mut self, hook: FallbackHook) -> Self {
        self.on_fallback = Some(hook);
        self
    }

    /// Current, tagged activations. Errors propagate.
    pub async fn activations(&self) -> Result<Vec<Activation>, FetchError> {
        let all = self.upstream.activations().await?;
        Ok(filter_current_activations(all, self.clock.now(), &self.xp_tag))
    }

    /// Current, tagged activations, or an empty list when the CMS fails.
    pub async fn current_activations(&self) -> Vec<Activation> {
        let result = self.activations().await;
        self.settle("activations", result, Vec::new())
    }

    /// Active proposals, or an empty list.
    pub async fn active_proposals(&self) -> Vec<Proposal> {
        let result = self.upstream.proposals().await.map(filter_active_proposals);
        self.settle("proposals", result, Vec::new())
    }

    /// Run every lookup for `address` concurrently.
    pub async fn collect(&self, address: &UserAddress, source: BalanceSource<'_>) -> UserData {
        debug!(address = %address, "aggregating user data");

        let (activations, poh, score, lxp, lxp_l, name, proposals) = tokio::join!(
            self.activations(),
            self.upstream.poh_status(address),
            self.upstream.open_block_score(address),
            self.balance(LXP_CONTRACT_ADDRESS, address, source),
            self.balance(LXP_L_CONTRACT_ADDRESS, address, source),
            self.name(address, source),
            self.upstream.proposals(),
        );

        UserData {
            activations: self.settle("activations", activations, Vec::new()),
            poh_status: self.settle("poh", poh, false),
            open_block_score: self.settle("openblock", score, 0),
            lxp_balance: self.settle("lxp_balance", lxp, RawBalance::zero()),
            lxp_l_balance: self.settle("lxp_l_balance", lxp_l, RawBalance::zero()),
            name: self.settle("ens", name, None),
            proposals: filter_active_proposals(self.settle("proposals", proposals, Vec::new())),
        }
    }

    /// Collect and merge the result into `store`; returns the merged state.
    pub async fn refresh(
        &self,
        store: &dyn StateStore,
        address: &UserAddress,
        source: BalanceSource<'_>,
    ) -> Result<SnapState, StoreError> {
        let data = self.collect(address, source).await;
        store.write(data.into_patch())?;
        store.read()
    }

    async fn balance(
        &self,
        contract: &str,
        address: &UserAddress,
        source: BalanceSource<'_>,
    ) -> Result<RawBalance, FetchError> {
        match source {
            BalanceSource::Chain(chain) => chain_token_balance(chain, contract, address).await,
            BalanceSource::Explorer => self.upstream.explorer_balance(contract, address).await,
            BalanceSource::Skip => Ok(RawBalance::zero()),
        }
    }

    async fn name(
        &self,
        address: &UserAddress,
        source: BalanceSource<'_>,
    ) -> Result<Option<String>, FetchError> {
        match source {
            BalanceSource::Skip => Ok(None),
            _ => self.upstream.ens_name(address).await,
        }
    }

    fn settle<T>(&self, label: &'static str, result: Result<T, FetchError>, default: T) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                warn!(fetch = label, error = %e, "upstream lookup failed, using default");
                if let Some(hook) = &self.on_fallback {
                    hook(label);
                }
                default
            }
        }
    }
}
