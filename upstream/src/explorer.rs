//! Lineascan token balances.

use serde::Deserialize;
use voyager_types::{RawBalance, UserAddress};

use crate::{FetchError, HttpJson, UpstreamConfig};

/// Etherscan-family envelope: `status` is `"1"` on success and `result`
/// holds either the payload or an error text.
#[derive(Debug, Deserialize)]
pub struct ExplorerResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

impl ExplorerResponse {
    pub fn into_balance(self) -> Result<RawBalance, FetchError> {
        if self.status != "1" {
            return Err(FetchError::InvalidResponse(format!(
                "explorer error: {} {}",
                self.message, self.result
            )));
        }
        match self.result {
            serde_json::Value::String(raw) => Ok(RawBalance::new(raw)),
            other => Err(FetchError::InvalidResponse(format!(
                "explorer balance is not a string: {other}"
            ))),
        }
    }
}

pub fn token_balance_url(
    config: &UpstreamConfig,
    api_key: &str,
    contract: &str,
    address: &UserAddress,
) -> String {
    format!(
        "{}?module=account&action=tokenbalance&contractaddress={}&address={}&tag=latest&apiKey={}",
        config.lineascan_url, contract, address, api_key
    )
}

/// `tokenbalance` of `contract` held by `address`, in raw units.
pub async fn fetch_token_balance(
    client: &HttpJson,
    config: &UpstreamConfig,
    contract: &str,
    address: &UserAddress,
) -> Result<RawBalance, FetchError> {
    let key = config
        .lineascan_api_key
        .as_deref()
        .ok_or(FetchError::MissingKey("Lineascan"))?;
    let url = token_balance_url(config, key, contract, address);
    let response: ExplorerResponse = client.get_json(&url, &[]).await?;
    response.into_balance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyager_types::{LXP_CONTRACT_ADDRESS, U256};

    #[test]
    fn url_carries_every_parameter() {
        let cfg = UpstreamConfig::default();
        let addr = UserAddress::parse("0x0000000000000000000000000000000000000001").unwrap();
        let url = token_balance_url(&cfg, "KEY", LXP_CONTRACT_ADDRESS, &addr);
        assert_eq!(
            url,
            "https://api.lineascan.build/api?module=account&action=tokenbalance\
             &contractaddress=0xd83af4fbD77f3AB65C3B1Dc4B38D7e67AEcf599A\
             &address=0x0000000000000000000000000000000000000001&tag=latest&apiKey=KEY"
        );
    }

    #[test]
    fn ok_envelope_yields_balance() {
        let resp: ExplorerResponse =
            serde_json::from_str(r#"{"status":"1","message":"OK","result":"3000000000000000000"}"#)
                .unwrap();
        assert_eq!(resp.into_balance().unwrap().to_display(), U256::from(3));
    }

    #[test]
    fn error_envelope_is_rejected() {
        let resp: ExplorerResponse =
            serde_json::from_str(r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#)
                .unwrap();
        assert!(matches!(resp.into_balance(), Err(FetchError::InvalidResponse(_))));
    }
}
