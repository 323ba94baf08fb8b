//! Direct chain reads (`eth_call`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use voyager_types::{RawBalance, UserAddress};

use crate::{FetchError, HttpJson};

/// ERC-20 `balanceOf(address)` selector.
pub const BALANCE_OF_SELECTOR: &str = "0x70a08231";

/// Read-only contract calls against the `latest` block.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Raw hex result of `eth_call { to, data }`.
    async fn eth_call(&self, to: &str, data: &str) -> Result<String, FetchError>;
}

/// `balanceOf(address)` calldata: selector then the address left-padded to 32 bytes.
pub fn balance_of_calldata(address: &UserAddress) -> String {
    format!("{BALANCE_OF_SELECTOR}{:0>64}", address.hex_digits())
}

/// Token balance of `address` read straight from the chain.
pub async fn chain_token_balance(
    chain: &dyn ChainReader,
    contract: &str,
    address: &UserAddress,
) -> Result<RawBalance, FetchError> {
    let word = chain.eth_call(contract, &balance_of_calldata(address)).await?;
    Ok(RawBalance::new(word))
}

/// A [`ChainReader`] speaking JSON-RPC over HTTP.
pub struct JsonRpcChain {
    client: HttpJson,
    url: String,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl JsonRpcChain {
    pub fn new(client: HttpJson, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl ChainReader for JsonRpcChain {
    async fn eth_call(&self, to: &str, data: &str) -> Result<String, FetchError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "eth_call",
            "params": [{ "to": to, "data": data }, "latest"],
        });
        let response: RpcResponse = self.client.post_json(&self.url, &request, &[]).await?;
        if let Some(err) = response.error {
            return Err(FetchError::Rpc(format!("{} (code {})", err.message, err.code)));
        }
        response
            .result
            .ok_or_else(|| FetchError::Rpc("response carries neither result nor error".into()))
    }
}
