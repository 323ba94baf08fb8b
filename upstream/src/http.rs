//! The production [`Upstream`]: every lookup over HTTP.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use voyager_types::{Activation, Proposal, RawBalance, UserAddress};
use voyager_utils::Clock;

use crate::{contentful, ens, explorer, openblock, poh, tally};
use crate::{FetchError, HttpJson, Upstream, UpstreamConfig};

pub struct HttpUpstream {
    client: HttpJson,
    config: UpstreamConfig,
    clock: Arc<dyn Clock>,
}

impl HttpUpstream {
    pub fn new(config: UpstreamConfig, clock: Arc<dyn Clock>) -> Result<Self, FetchError> {
        let client = HttpJson::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_client(client, config, clock))
    }

    pub fn with_client(client: HttpJson, config: UpstreamConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Shared client, for building a [`JsonRpcChain`](crate::JsonRpcChain) on the same pool.
    pub fn client(&self) -> &HttpJson {
        &self.client
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn activations(&self) -> Result<Vec<Activation>, FetchError> {
        contentful::fetch_activations(&self.client, &self.config).await
    }

    async fn poh_status(&self, address: &UserAddress) -> Result<bool, FetchError> {
        poh::fetch_poh_status(&self.client, &self.config, address).await
    }

    async fn open_block_score(&self, address: &UserAddress) -> Result<u64, FetchError> {
        openblock::fetch_open_block_score(&self.client, &self.config, address).await
    }

    async fn explorer_balance(
        &self,
        contract: &str,
        address: &UserAddress,
    ) -> Result<RawBalance, FetchError> {
        explorer::fetch_token_balance(&self.client, &self.config, contract, address).await
    }

    async fn ens_name(&self, address: &UserAddress) -> Result<Option<String>, FetchError> {
        ens::fetch_ens_name(&self.client, &self.config, address, self.clock.now()).await
    }

    async fn proposals(&self) -> Result<Vec<Proposal>, FetchError> {
        tally::fetch_proposals(&self.client, &self.config).await
    }
}
