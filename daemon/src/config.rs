//! Daemon configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use voyager_types::ChainId;
use voyager_upstream::UpstreamConfig;

/// Configuration for the daemon.
///
/// Every field has a default, so an empty file is valid. CLI flags and
/// environment variables override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Address the HTTP functions bind to.
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// JSON file standing in for the host's snap state.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Locale reported by the local host.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Chain id reported by the local host.
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// JSON-RPC endpoint answering the local host's `eth_call`.
    #[serde(default = "default_chain_rpc_url")]
    pub chain_rpc_url: String,

    /// Registration function the snap posts signed payloads to.
    #[serde(default)]
    pub registration_url: Option<String>,

    #[serde(default)]
    pub sheets_spreadsheet_id: Option<String>,

    #[serde(default)]
    pub upstream: UpstreamConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./voyager_state.json")
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_chain_id() -> String {
    ChainId::LINEA_MAINNET.to_string()
}

fn default_chain_rpc_url() -> String {
    "https://rpc.linea.build".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    pub fn from_toml_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            state_file: default_state_file(),
            locale: default_locale(),
            chain_id: default_chain_id(),
            chain_rpc_url: default_chain_rpc_url(),
            registration_url: None,
            sheets_spreadsheet_id: None,
            upstream: UpstreamConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = DaemonConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.port, 8888);
        assert_eq!(config.chain_id, "0xe708");
        assert_eq!(config.log_format, "human");
        assert_eq!(config.upstream.timeout_secs, 30);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            port = 9999
            locale = "fr-FR"

            [upstream]
            lineascan_url = "http://localhost:4000/api"
        "#;
        let config = DaemonConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.port, 9999);
        assert_eq!(config.locale, "fr-FR");
        assert_eq!(config.upstream.lineascan_url, "http://localhost:4000/api");
        assert_eq!(config.upstream.poh_url, UpstreamConfig::default().poh_url);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = DaemonConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = DaemonConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.state_file, config.state_file);
    }
}
