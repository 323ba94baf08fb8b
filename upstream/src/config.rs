//! Upstream endpoints and credentials.

use serde::{Deserialize, Serialize};
use std::fmt;
use voyager_types::GET_XP_TAG;

/// Where every upstream lives. Defaults are the public production endpoints.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Contentful entries URL (already filtered to the `activationsCard` type).
    pub contentful_url: String,
    pub contentful_api_key: Option<String>,
    /// Tag id an activation must carry to be listed.
    pub xp_tag: String,

    pub lineascan_url: String,
    pub lineascan_api_key: Option<String>,

    /// Base URL; the address is appended as a path segment.
    pub poh_url: String,

    pub openblock_url: String,
    /// Value of the `Origin` header OpenBlock expects.
    pub openblock_origin: String,

    /// Public subgraph endpoint used when no Graph key is configured.
    pub ens_studio_url: String,
    pub ens_gateway_url: String,
    pub ens_subgraph_id: String,
    pub the_graph_api_key: Option<String>,

    pub tally_url: String,
    pub tally_api_key: Option<String>,
    pub tally_governor_id: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Subgraph URL: keyed gateway when a Graph key is set, studio otherwise.
    pub fn ens_url(&self) -> String {
        match self.the_graph_api_key.as_deref() {
            Some(key) if !key.is_empty() => format!(
                "{}/{}/subgraphs/id/{}",
                self.ens_gateway_url.trim_end_matches('/'),
                key,
                self.ens_subgraph_id
            ),
            _ => self.ens_studio_url.clone(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            contentful_url: "https://api.contentful.com/spaces/64upluvbiuck/environments/master/entries/?content_type=activationsCard".to_string(),
            contentful_api_key: None,
            xp_tag: GET_XP_TAG.to_string(),
            lineascan_url: "https://api.lineascan.build/api".to_string(),
            lineascan_api_key: None,
            poh_url: "https://linea-xp-poh-api.linea.build/poh".to_string(),
            openblock_url: "https://kx58j6x5me.execute-api.us-east-1.amazonaws.com/linea/userPointsSearchMetaMask".to_string(),
            openblock_origin: "snap://linea-voyager".to_string(),
            ens_studio_url: "https://api.studio.thegraph.com/query/69290/ens-linea-mainnet/version/latest".to_string(),
            ens_gateway_url: "https://gateway.thegraph.com/api".to_string(),
            ens_subgraph_id: "G5YH6BWrybbfua5sngRQ7Ku1LRCVx4qf5zjkqWG9FSuV".to_string(),
            the_graph_api_key: None,
            tally_url: "https://api.tally.xyz/query".to_string(),
            tally_api_key: None,
            tally_governor_id: "eip155:1:0x5d2C31ce16924C2a71D317e5BbFd5ce387854039".to_string(),
            timeout_secs: 30,
        }
    }
}

fn redact(secret: &Option<String>) -> &'static str {
    if secret.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("contentful_url", &self.contentful_url)
            .field("contentful_api_key", &redact(&self.contentful_api_key))
            .field("xp_tag", &self.xp_tag)
            .field("lineascan_url", &self.lineascan_url)
            .field("lineascan_api_key", &redact(&self.lineascan_api_key))
            .field("poh_url", &self.poh_url)
            .field("openblock_url", &self.openblock_url)
            .field("ens_url", &self.ens_studio_url)
            .field("the_graph_api_key", &redact(&self.the_graph_api_key))
            .field("tally_url", &self.tally_url)
            .field("tally_api_key", &redact(&self.tally_api_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ens_url_prefers_gateway_with_key() {
        let mut cfg = UpstreamConfig::default();
        assert_eq!(cfg.ens_url(), cfg.ens_studio_url);
        cfg.the_graph_api_key = Some("k3y".into());
        assert_eq!(
            cfg.ens_url(),
            "https://gateway.thegraph.com/api/k3y/subgraphs/id/G5YH6BWrybbfua5sngRQ7Ku1LRCVx4qf5zjkqWG9FSuV"
        );
    }

    #[test]
    fn debug_redacts_secrets() {
        let cfg = UpstreamConfig {
            tally_api_key: Some("super-secret".into()),
            ..Default::default()
        };
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("<set>"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: UpstreamConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.xp_tag, GET_XP_TAG);
    }
}
