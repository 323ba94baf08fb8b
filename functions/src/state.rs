//! Shared state of the HTTP functions.

use std::sync::Arc;
use voyager_registration::RegistrationService;
use voyager_upstream::{Aggregator, Upstream, UpstreamConfig};
use voyager_utils::Clock;

use crate::{FunctionError, FunctionMetrics};

/// Server-side secrets. A missing key fails the functions that need it with a 500.
#[derive(Clone, Default)]
pub struct Secrets {
    pub contentful_api_key: Option<String>,
    pub lineascan_api_key: Option<String>,
    pub tally_api_key: Option<String>,
}

impl Secrets {
    pub fn require_contentful(&self) -> Result<(), FunctionError> {
        require(&self.contentful_api_key, "Contentful")
    }

    pub fn require_lineascan(&self) -> Result<(), FunctionError> {
        require(&self.lineascan_api_key, "Lineascan")
    }

    pub fn require_tally(&self) -> Result<(), FunctionError> {
        require(&self.tally_api_key, "Tally")
    }
}

/// The keys the functions check are the ones the upstream client sends.
impl From<&UpstreamConfig> for Secrets {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            contentful_api_key: config.contentful_api_key.clone(),
            lineascan_api_key: config.lineascan_api_key.clone(),
            tally_api_key: config.tally_api_key.clone(),
        }
    }
}

fn require(key: &Option<String>, name: &'static str) -> Result<(), FunctionError> {
    match key.as_deref() {
        Some(k) if !k.is_empty() => Ok(()),
        _ => Err(FunctionError::MissingKey(name)),
    }
}

#[derive(Clone)]
pub struct FunctionsState {
    pub secrets: Secrets,
    pub aggregator: Arc<Aggregator>,
    /// `None` when no ledger is configured.
    pub registration: Option<Arc<RegistrationService>>,
    pub metrics: Arc<FunctionMetrics>,
}

impl FunctionsState {
    pub fn new(
        secrets: Secrets,
        upstream: Arc<dyn Upstream>,
        clock: Arc<dyn Clock>,
        registration: Option<Arc<RegistrationService>>,
    ) -> Result<Self, FunctionError> {
        let metrics = FunctionMetrics::new()
            .map_err(|e| FunctionError::Internal(format!("metrics registry: {e}")))?;
        let aggregator =
            Aggregator::new(upstream, clock).with_fallback_hook(metrics.fallback_hook());
        Ok(Self {
            secrets,
            aggregator: Arc::new(aggregator),
            registration,
            metrics: Arc::new(metrics),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_follow_upstream_config() {
        let config = UpstreamConfig {
            contentful_api_key: Some("cf".into()),
            tally_api_key: Some(String::new()),
            ..UpstreamConfig::default()
        };
        let secrets = Secrets::from(&config);

        assert!(secrets.require_contentful().is_ok());
        assert_eq!(
            secrets.require_lineascan().unwrap_err().to_string(),
            "Lineascan API key not set"
        );
        assert!(secrets.require_tally().is_err());
    }
}
