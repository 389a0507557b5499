use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::resolution::source::{ResultSource, SourceError, SourceFuture, TrustTier};

/// Sent with every live request so intermediaries never answer from cache.
pub const NO_CACHE_HEADERS: &[(&str, &str)] = &[
    ("Cache-Control", "no-cache, no-store, must-revalidate"),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse, SourceError>> + Send + 'a>>;

/// Minimal GET transport. Transport failures map to `SourceError::Network`.
pub trait HttpClient: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(&'static str, &'static str)],
    ) -> HttpFuture<'a>;
}

/// Append `param=nonce` to `url`, keeping any existing query.
pub fn cache_busted(url: &str, param: &str, nonce: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{param}={nonce}")
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    if base_url.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// One live endpoint.
pub struct HttpSource<C> {
    client: Arc<C>,
    url: String,
    cache_bust_param: String,
    sequence: AtomicU64,
}

impl<C: HttpClient> HttpSource<C> {
    pub fn new(client: Arc<C>, base_url: &str, path: &str, cache_bust_param: &str) -> Self {
        Self {
            client,
            url: join_url(base_url, path),
            cache_bust_param: cache_bust_param.to_string(),
            sequence: AtomicU64::new(0),
        }
    }

    /// URL for the next request. Distinct on every call.
    pub fn request_url(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let nonce = format!("{}-{}", Utc::now().timestamp_millis(), seq);
        cache_busted(&self.url, &self.cache_bust_param, &nonce)
    }
}

impl<C: HttpClient> ResultSource for HttpSource<C> {
    fn name(&self) -> &str {
        &self.url
    }

    fn tier(&self) -> TrustTier {
        TrustTier::Live
    }

    fn fetch(&self) -> SourceFuture<'_> {
        Box::pin(async move {
            let url = self.request_url();
            let response = self.client.get(&url, NO_CACHE_HEADERS).await?;
            if !response.is_success() {
                return Err(SourceError::HttpStatus(response.status));
            }
            Ok(response.json()?)
        })
    }
}

#[cfg(feature = "http-client")]
pub use reqwest_client::ReqwestClient;

#[cfg(feature = "http-client")]
mod reqwest_client {
    use std::time::Duration;

    use super::{HttpClient, HttpFuture, HttpResponse};
    use crate::resolution::source::SourceError;

    /// `HttpClient` over reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new(timeout: Duration) -> Result<Self, SourceError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| SourceError::Network(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        fn get<'a>(
            &'a self,
            url: &'a str,
            headers: &'a [(&'static str, &'static str)],
        ) -> HttpFuture<'a> {
            Box::pin(async move {
                let mut request = self.client.get(url);
                for (name, value) in headers {
                    request = request.header(*name, *value);
                }
                let response = request
                    .send()
                    .await
                    .map_err(|e| SourceError::Network(e.to_string()))?;
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .map_err(|e| SourceError::Network(e.to_string()))?;
                Ok(HttpResponse { status, body })
            })
        }
    }
}
