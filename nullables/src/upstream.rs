//! Nullable upstream and chain: scripted lookup results.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use voyager_types::{Activation, Proposal, RawBalance, UserAddress};
use voyager_upstream::{ChainReader, FetchError, Upstream};

/// Lookup labels accepted by [`NullUpstream::fail`].
pub const ACTIVATIONS: &str = "activations";
pub const POH: &str = "poh";
pub const OPENBLOCK: &str = "openblock";
pub const EXPLORER: &str = "explorer";
pub const ENS: &str = "ens";
pub const PROPOSALS: &str = "proposals";

/// An [`Upstream`] answering from scripted values.
///
/// Unscripted balances are `"0"`. Every call is recorded by label.
#[derive(Default)]
pub struct NullUpstream {
    activations: Vec<Activation>,
    poh: bool,
    score: u64,
    balances: HashMap<String, RawBalance>,
    ens: Option<String>,
    proposals: Vec<Proposal>,
    failing: HashSet<&'static str>,
    calls: Mutex<Vec<&'static str>>,
}

impl NullUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activations(mut self, activations: Vec<Activation>) -> Self {
        self.activations = activations;
        self
    }

    pub fn with_poh(mut self, verified: bool) -> Self {
        self.poh = verified;
        self
    }

    pub fn with_score(mut self, score: u64) -> Self {
        self.score = score;
        self
    }

    pub fn with_balance(mut self, contract: &str, raw: &str) -> Self {
        self.balances
            .insert(contract.to_lowercase(), RawBalance::new(raw));
        self
    }

    pub fn with_ens(mut self, name: &str) -> Self {
        self.ens = Some(name.to_string());
        self
    }

    pub fn with_proposals(mut self, proposals: Vec<Proposal>) -> Self {
        self.proposals = proposals;
        self
    }

    /// Make the lookup labelled `label` fail.
    pub fn fail(mut self, label: &'static str) -> Self {
        self.failing.insert(label);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, label: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == label).count()
    }

    fn record(&self, label: &'static str) -> Result<(), FetchError> {
        self.calls.lock().unwrap().push(label);
        if self.failing.contains(label) {
            Err(FetchError::Unreachable(format!("{label} is down")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Upstream for NullUpstream {
    async fn activations(&self) -> Result<Vec<Activation>, FetchError> {
        self.record(ACTIVATIONS)?;
        Ok(self.activations.clone())
    }

    async fn poh_status(&self, _address: &UserAddress) -> Result<bool, FetchError> {
        self.record(POH)?;
        Ok(self.poh)
    }

    async fn open_block_score(&self, _address: &UserAddress) -> Result<u64, FetchError> {
        self.record(OPENBLOCK)?;
        Ok(self.score)
    }

    async fn explorer_balance(
        &self,
        contract: &str,
        _address: &UserAddress,
    ) -> Result<RawBalance, FetchError> {
        self.record(EXPLORER)?;
        Ok(self
            .balances
            .get(&contract.to_lowercase())
            .cloned()
            .unwrap_or_else(RawBalance::zero))
    }

    async fn ens_name(&self, _address: &UserAddress) -> Result<Option<String>, FetchError> {
        self.record(ENS)?;
        Ok(self.ens.clone())
    }

    async fn proposals(&self) -> Result<Vec<Proposal>, FetchError> {
        self.record(PROPOSALS)?;
        Ok(self.proposals.clone())
    }
}

/// A [`ChainReader`] returning scripted 32-byte words per contract.
#[derive(Default)]
pub struct NullChain {
    words: HashMap<String, String>,
    failing: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl NullChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `balanceOf` on `contract` with `whole * 10^18` units.
    pub fn with_balance(mut self, contract: &str, whole: u64) -> Self {
        let units = u128::from(whole) * 10u128.pow(18);
        self.words
            .insert(contract.to_lowercase(), format!("0x{units:064x}"));
        self
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// `(to, data)` of every call so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainReader for NullChain {
    async fn eth_call(&self, to: &str, data: &str) -> Result<String, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((to.to_string(), data.to_string()));
        if self.failing {
            return Err(FetchError::Rpc("execution reverted".into()));
        }
        Ok(self
            .words
            .get(&to.to_lowercase())
            .cloned()
            .unwrap_or_else(|| "0x".to_string()))
    }
}
