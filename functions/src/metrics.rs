//! Prometheus metrics for the HTTP functions.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use voyager_upstream::FallbackHook;

use crate::FunctionError;

pub struct FunctionMetrics {
    pub registry: Registry,
    pub requests: IntCounterVec,
    pub upstream_fallbacks: IntCounterVec,
    pub registrations: IntCounter,
}

impl FunctionMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("voyager_requests_total", "HTTP function calls by status class"),
            &["function", "status"],
        )?;
        let upstream_fallbacks = IntCounterVec::new(
            Opts::new(
                "voyager_upstream_fallbacks_total",
                "Upstream lookups replaced by their default",
            ),
            &["fetch"],
        )?;
        let registrations = IntCounter::new(
            "voyager_registrations_total",
            "Registrations appended to the ledger",
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(upstream_fallbacks.clone()))?;
        registry.register(Box::new(registrations.clone()))?;

        Ok(Self {
            registry,
            requests,
            upstream_fallbacks,
            registrations,
        })
    }

    /// Count one call of `function` answered with `status`.
    pub fn observe(&self, function: &str, status: u16) {
        let class = match status {
            200..=299 => "2xx",
            400..=499 => "4xx",
            500..=599 => "5xx",
            _ => "other",
        };
        self.requests.with_label_values(&[function, class]).inc();
    }

    /// Hook for the aggregator counting substituted defaults.
    pub fn fallback_hook(&self) -> FallbackHook {
        let counter = self.upstream_fallbacks.clone();
        Arc::new(move |label| counter.with_label_values(&[label]).inc())
    }

    /// Text exposition format.
    pub fn encode(&self) -> Result<String, FunctionError> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| FunctionError::Internal(format!("encode metrics: {e}")))?;
        String::from_utf8(buffer).map_err(|e| FunctionError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        let metrics = FunctionMetrics::new().unwrap();
        metrics.observe("global", 200);
        metrics.observe("global", 400);
        (metrics.fallback_hook())("poh");
        metrics.registrations.inc();

        let text = metrics.encode().unwrap();
        assert!(text.contains(r#"voyager_requests_total{function="global",status="2xx"} 1"#));
        assert!(text.contains(r#"voyager_requests_total{function="global",status="4xx"} 1"#));
        assert!(text.contains(r#"voyager_upstream_fallbacks_total{fetch="poh"} 1"#));
        assert!(text.contains("voyager_registrations_total 1"));
    }
}
