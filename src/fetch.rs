//! HTTP page fetching with a browser client identity and response memoization.
//!
//! The portals scraped by this application reject obvious non-browser
//! clients, so every request carries a fixed desktop Chrome `User-Agent`.
//! Requests are bounded by a 10 second timeout and any transport error,
//! timeout, or non-2xx status is returned as a [`FetchError`] for the caller
//! to report; fetching never panics and never retries.
//!
//! # Caching
//!
//! Successful response bodies are memoized per URL through the [`BodyCache`]
//! trait so repeated rendering passes within one process do not re-fetch.
//! Failures are never cached: a fresh pass always re-attempts a source that
//! failed before. The cache is injected at construction so tests (and the
//! `--no-cache` flag) can swap in [`NoCache`].

use dashmap::DashMap;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// The fixed client identity sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Hard deadline for a single page fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a page could not be retrieved.
///
/// Carries the attempted URL alongside the underlying cause so the failure
/// can be reported to the user verbatim. A failure is terminal for the
/// rendering pass that observed it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection error, TLS error, or timeout.
    #[error("could not reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: StatusCode },
}

impl FetchError {
    /// The URL whose fetch failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } => url,
            FetchError::Status { url, .. } => url,
        }
    }
}

/// Process-lifetime memoization of successful response bodies, keyed by URL.
///
/// Implementations must be safe to populate from concurrent fetches.
pub trait BodyCache: Send + Sync {
    /// Look up a previously cached body.
    fn get(&self, url: &str) -> Option<String>;
    /// Store a successfully fetched body.
    fn put(&self, url: &str, body: String);
}

/// In-memory [`BodyCache`] used by the long-running server.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached bodies; lets tests inspect memoization behavior.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BodyCache for MemoryCache {
    fn get(&self, url: &str) -> Option<String> {
        self.entries.get(url).map(|entry| entry.value().clone())
    }

    fn put(&self, url: &str, body: String) {
        self.entries.insert(url.to_string(), body);
    }
}

/// A [`BodyCache`] that caches nothing; every fetch hits the network.
#[derive(Debug)]
pub struct NoCache;

impl BodyCache for NoCache {
    fn get(&self, _url: &str) -> Option<String> {
        None
    }

    fn put(&self, _url: &str, _body: String) {}
}

/// Fetches listing pages with a fixed browser identity and bounded timeout.
pub struct PageFetcher {
    client: reqwest::Client,
    cache: Arc<dyn BodyCache>,
    inflight: DashMap<String, Arc<Mutex<()>>>,
}

impl PageFetcher {
    /// Build a fetcher around the given response cache.
    pub fn new(cache: Arc<dyn BodyCache>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            cache,
            inflight: DashMap::new(),
        })
    }

    /// Fetch one page, serving from the cache when possible.
    ///
    /// Concurrent calls for the same URL are collapsed into a single request:
    /// a per-URL guard holds the later callers until the first one has either
    /// populated the cache or failed. Only successful bodies are cached.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Some(body) = self.cache.get(url) {
            debug!(%url, "Serving page from cache");
            return Ok(body);
        }

        let gate = self.inflight.entry(url.to_string()).or_default().clone();
        let _guard = gate.lock().await;

        // A concurrent fetch may have filled the cache while we waited.
        if let Some(body) = self.cache.get(url) {
            debug!(%url, "Serving page from cache");
            return Ok(body);
        }

        let body = self.fetch_uncached(url).await?;
        self.cache.put(url, body.clone());
        Ok(body)
    }

    async fn fetch_uncached(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        info!(%url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
