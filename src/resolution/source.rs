use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::resolution::storage::StoreError;
use crate::summary::PayloadDefect;

/// Trust tier of a source, most trusted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustTier {
    /// Authoritative live computation.
    Live,
    /// A snapshot injected by the host page or a previous session.
    Snapshot,
    /// A locally persisted legacy copy.
    Legacy,
}

impl TrustTier {
    pub fn as_str(self) -> &'static str {
        match self {
            TrustTier::Live => "live",
            TrustTier::Snapshot => "snapshot",
            TrustTier::Legacy => "legacy",
        }
    }

    pub fn is_authoritative(self) -> bool {
        self == TrustTier::Live
    }
}

/// Which source answered a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub source: String,
    pub tier: TrustTier,
    /// 1-based position of the answering source in the attempt order.
    pub attempt: usize,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("timed out after {0} ms")]
    Timeout(u64),
    #[error("nothing stored under {0:?}")]
    Missing(String),
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unusable payload: {0}")]
    Unusable(#[from] PayloadDefect),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

pub type SourceFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, SourceError>> + Send + 'a>>;

/// One place a result payload may come from.
pub trait ResultSource: Send + Sync {
    fn name(&self) -> &str;

    fn tier(&self) -> TrustTier;

    /// Produce the raw payload. Structural checks are the resolver's job.
    fn fetch(&self) -> SourceFuture<'_>;
}

/// A payload handed in by the caller, e.g. a snapshot the host page injected.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    tier: TrustTier,
    payload: Option<Value>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, tier: TrustTier, payload: Option<Value>) -> Self {
        Self {
            name: name.into(),
            tier,
            payload,
        }
    }
}

impl ResultSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> TrustTier {
        self.tier
    }

    fn fetch(&self) -> SourceFuture<'_> {
        Box::pin(async move {
            self.payload
                .clone()
                .ok_or_else(|| SourceError::Missing(self.name.clone()))
        })
    }
}
