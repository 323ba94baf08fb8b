//! The wallet host boundary.

use async_trait::async_trait;
use voyager_types::ChainId;
use voyager_upstream::{ChainReader, FetchError};

use crate::{Dialog, SnapError};

/// What the snap needs from the wallet it runs in.
#[async_trait]
pub trait Host: Send + Sync {
    /// Chain id of the currently selected network.
    async fn chain_id(&self) -> Result<ChainId, SnapError>;

    /// User interface locale, e.g. `en-US`.
    async fn locale(&self) -> Result<String, SnapError>;

    /// `eth_call` against the selected network, `latest` block.
    async fn eth_call(&self, to: &str, data: &str) -> Result<String, SnapError>;

    /// Show a dialog. Prompts resolve to the entered text, or `None` when
    /// dismissed; alerts always resolve to `None`.
    async fn show_dialog(&self, dialog: &Dialog) -> Result<Option<String>, SnapError>;
}

/// The host's provider seen as a [`ChainReader`].
pub struct HostChain<'a>(pub &'a dyn Host);

#[async_trait]
impl ChainReader for HostChain<'_> {
    async fn eth_call(&self, to: &str, data: &str) -> Result<String, FetchError> {
        self.0
            .eth_call(to, data)
            .await
            .map_err(|e| FetchError::Rpc(e.to_string()))
    }
}
