pub mod config;
pub mod http;
pub mod resolver;
pub mod source;
pub mod storage;

pub use config::ResolverConfig;
pub use http::{HttpClient, HttpFuture, HttpResponse, HttpSource, NO_CACHE_HEADERS};
#[cfg(feature = "http-client")]
pub use http::ReqwestClient;
pub use resolver::{resolve_sources, Resolution, ResolvedPayload, ResultResolver, SourceFailure};
pub use source::{Provenance, ResultSource, SourceError, SourceFuture, StaticSource, TrustTier};
pub use storage::{
    load_json, save_json, FileStore, KeyValueStore, MemoryStore, StoreError, StoreSource,
};
