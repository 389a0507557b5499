use std::time::Duration;

use serde::{Deserialize, Serialize};

// Key point:
// Serializable
// Comparable
// Explicit defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Prefix for live endpoints; empty means the paths are used as given.
    pub base_url: String,
    /// Live-tier endpoint paths, tried in order.
    pub endpoints: Vec<String>,
    /// Storage key of the previously injected snapshot.
    pub snapshot_key: String,
    /// Storage key of the locally persisted legacy copy.
    pub legacy_key: String,
    /// Upper bound on one source attempt.
    pub source_timeout_ms: u64,
    /// Query parameter carrying the per-request cache-busting nonce.
    pub cache_bust_param: String,
}

impl ResolverConfig {
    pub fn v0() -> Self {
        Self {
            base_url: String::new(),
            endpoints: vec![
                "/api/v1/results/latest".into(),
                "/api/results/latest".into(),
                "/results/latest".into(),
            ],
            snapshot_key: "shipcase.results.snapshot".into(),
            legacy_key: "shipcase.results.legacy".into(),
            source_timeout_ms: 8_000,
            cache_bust_param: "_ts".into(),
        }
    }

    /// Parse a config; absent fields take their `v0` values.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::v0()
    }
}
