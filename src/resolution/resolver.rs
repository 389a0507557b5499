use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use serde_json::Value;

use crate::resolution::config::ResolverConfig;
use crate::resolution::http::{HttpClient, HttpSource};
use crate::resolution::source::{Provenance, ResultSource, SourceError, TrustTier};
use crate::resolution::storage::{KeyValueStore, StoreSource};
use crate::summary::{normalize_summary, usable_payload};
use crate::types::summary::ResultsSummary;

/// A usable payload and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPayload {
    /// Envelope already removed.
    pub payload: Value,
    pub provenance: Provenance,
}

impl ResolvedPayload {
    pub fn summary(&self) -> ResultsSummary {
        normalize_summary(&self.payload)
    }
}

/// Why one source was skipped.
#[derive(Debug)]
pub struct SourceFailure {
    pub source: String,
    pub tier: TrustTier,
    pub error: SourceError,
}

/// Outcome of a resolution. Exhaustion is a value, not an error.
#[derive(Debug)]
pub enum Resolution {
    Found(ResolvedPayload),
    NotFound(Vec<SourceFailure>),
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn found(&self) -> Option<&ResolvedPayload> {
        match self {
            Resolution::Found(resolved) => Some(resolved),
            Resolution::NotFound(_) => None,
        }
    }

    pub fn into_found(self) -> Option<ResolvedPayload> {
        match self {
            Resolution::Found(resolved) => Some(resolved),
            Resolution::NotFound(_) => None,
        }
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        self.found().map(|r| &r.provenance)
    }

    pub fn failures(&self) -> &[SourceFailure] {
        match self {
            Resolution::Found(_) => &[],
            Resolution::NotFound(failures) => failures,
        }
    }
}

/// Ordered fallback over result sources.
pub struct ResultResolver {
    sources: Vec<Box<dyn ResultSource>>,
    timeout: Duration,
}

impl ResultResolver {
    pub fn new(sources: Vec<Box<dyn ResultSource>>, timeout: Duration) -> Self {
        Self { sources, timeout }
    }

    /// Live endpoints in configured order, then the stored snapshot, then
    /// the legacy copy.
    pub fn standard<C, S>(client: Arc<C>, store: Arc<S>, config: &ResolverConfig) -> Self
    where
        C: HttpClient + 'static,
        S: KeyValueStore + 'static,
    {
        let mut sources: Vec<Box<dyn ResultSource>> = config
            .endpoints
            .iter()
            .map(|path| {
                Box::new(HttpSource::new(
                    Arc::clone(&client),
                    &config.base_url,
                    path,
                    &config.cache_bust_param,
                )) as Box<dyn ResultSource>
            })
            .collect();
        sources.push(Box::new(StoreSource::new(
            Arc::clone(&store),
            config.snapshot_key.clone(),
            TrustTier::Snapshot,
        )));
        sources.push(Box::new(StoreSource::new(
            store,
            config.legacy_key.clone(),
            TrustTier::Legacy,
        )));
        Self::new(sources, config.source_timeout())
    }

    pub fn with_source(mut self, source: Box<dyn ResultSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn resolve(&self) -> Resolution {
        resolve_sources(&self.sources, self.timeout).await
    }
}

/// Try `sources` in order; the first usable payload wins.
///
/// Sources are attempted strictly one after another, each bounded by
/// `timeout`. A source that fails, times out or returns an unusable payload
/// is recorded and skipped.
pub async fn resolve_sources(sources: &[Box<dyn ResultSource>], timeout: Duration) -> Resolution {
    let mut failures = Vec::new();

    for (index, source) in sources.iter().enumerate() {
        debug!(
            "resolving results: trying {} ({})",
            source.name(),
            source.tier().as_str()
        );

        let fetched = match tokio::time::timeout(timeout, source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(timeout.as_millis() as u64)),
        };

        let checked = fetched.and_then(|raw| {
            usable_payload(&raw)
                .map(Value::clone)
                .map_err(SourceError::from)
        });

        match checked {
            Ok(payload) => {
                info!(
                    "resolved results from {} ({}) on attempt {}",
                    source.name(),
                    source.tier().as_str(),
                    index + 1
                );
                return Resolution::Found(ResolvedPayload {
                    payload,
                    provenance: Provenance {
                        source: source.name().to_string(),
                        tier: source.tier(),
                        attempt: index + 1,
                    },
                });
            }
            Err(error) => {
                warn!("result source {} skipped: {}", source.name(), error);
                failures.push(SourceFailure {
                    source: source.name().to_string(),
                    tier: source.tier(),
                    error,
                });
            }
        }
    }

    warn!("no result source produced a usable payload ({} tried)", sources.len());
    Resolution::NotFound(failures)
}
