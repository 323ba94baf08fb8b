//! Proof-of-Humanity status.

use serde::Deserialize;
use voyager_types::UserAddress;

use crate::{FetchError, HttpJson, UpstreamConfig};

#[derive(Debug, Deserialize)]
pub struct PohResponse {
    #[serde(default)]
    pub poh: bool,
}

pub async fn fetch_poh_status(
    client: &HttpJson,
    config: &UpstreamConfig,
    address: &UserAddress,
) -> Result<bool, FetchError> {
    let url = format!("{}/{}", config.poh_url.trim_end_matches('/'), address);
    let response: PohResponse = client.get_json(&url, &[]).await?;
    Ok(response.poh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flag_is_unverified() {
        let resp: PohResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.poh);
        let resp: PohResponse = serde_json::from_str(r#"{"poh":true}"#).unwrap();
        assert!(resp.poh);
    }
}
