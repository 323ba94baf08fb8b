//! The upstream lookup surface.

use async_trait::async_trait;
use voyager_types::{Activation, Proposal, RawBalance, UserAddress};

use crate::FetchError;

/// Off-chain lookups, one call per external source.
///
/// Implementations return raw, unfiltered data; filtering and fail-soft
/// defaults are the [`Aggregator`](crate::Aggregator)'s job.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// All activation cards from the CMS.
    async fn activations(&self) -> Result<Vec<Activation>, FetchError>;

    /// Whether the address passed Proof of Humanity.
    async fn poh_status(&self, address: &UserAddress) -> Result<bool, FetchError>;

    /// OpenBlock XP score.
    async fn open_block_score(&self, address: &UserAddress) -> Result<u64, FetchError>;

    /// Token balance from the block explorer (raw units).
    async fn explorer_balance(
        &self,
        contract: &str,
        address: &UserAddress,
    ) -> Result<RawBalance, FetchError>;

    /// Primary ENS name, if any.
    async fn ens_name(&self, address: &UserAddress) -> Result<Option<String>, FetchError>;

    /// Governance proposals of every status.
    async fn proposals(&self) -> Result<Vec<Proposal>, FetchError>;
}
