//! Keynote API client: cache-gated response fetcher plus dashboard extractors.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use tracing::debug;

use crate::cache::{ResponseCache, DEFAULT_MAX_AGE};
use crate::error::{KeynoteError, Result};
use crate::types::{DashboardDocument, RateLimitState};

/// Production API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.keynote.com/keynote/api";

/// Environment fallback for the API key.
pub const API_KEY_ENV: &str = "KEYNOTE_API_KEY";

/// The one command this client consumes.
pub const DASHBOARD_COMMAND: &str = "getdashboarddata";

/// Response encodings the API can produce. Only JSON is consumed here; XML
/// stays constructible for completeness of the URL builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Json,
    Xml,
}

impl ApiFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiFormat::Json => "json",
            ApiFormat::Xml => "xml",
        }
    }
}

/// Build the request URL for one API command.
pub fn api_url(base: &str, command: &str, api_key: &str, format: ApiFormat) -> String {
    format!(
        "{}/{}?api_key={}&format={}",
        base.trim_end_matches('/'),
        command,
        api_key,
        format.as_str()
    )
}

/// Outbound proxy. At most one mechanism may be configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyConfig {
    /// Plain HTTPS proxy URL, e.g. `http://proxy.example.net:3128`.
    Https(String),
    /// SOCKS5 proxy address (`host:port`). Requires the `socks` cargo feature.
    Socks(String),
}

/// Configuration for [`KeynoteClient`].
#[derive(Debug, Clone)]
pub struct KeynoteConfig {
    /// Explicit API key; falls back to [`API_KEY_ENV`] when `None`.
    pub api_key: Option<String>,
    /// Endpoint override, mainly for tests.
    pub base_url: String,
    pub proxy: Option<ProxyConfig>,
    /// Fixed input file that forces cache-only behavior (testing/offline use).
    pub mock_input: Option<PathBuf>,
    pub cache_enabled: bool,
    pub cache_dir: Option<PathBuf>,
    pub cache_max_age: Duration,
}

impl Default for KeynoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_BASE.to_string(),
            proxy: None,
            mock_input: None,
            cache_enabled: true,
            cache_dir: None,
            cache_max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl KeynoteConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_mock_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.mock_input = Some(path.into());
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache_enabled = false;
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn with_cache_max_age(mut self, max_age: Duration) -> Self {
        self.cache_max_age = max_age;
        self
    }
}

/// Client for the Keynote dashboard API.
///
/// Each accessor re-fetches the dashboard document, relying on the on-disk
/// cache to keep repeated calls cheap against the hourly/daily call limits.
/// Rate-limit counters live on the client for its lifetime.
pub struct KeynoteClient {
    api_key: String,
    base_url: String,
    mock_input: Option<PathBuf>,
    cache_enabled: bool,
    cache: ResponseCache,
    rate_limits: RateLimitState,
    http: reqwest::Client,
}

impl KeynoteClient {
    /// Build a client, resolving the API key (explicit parameter first, then
    /// the `KEYNOTE_API_KEY` environment variable) and the proxy transport.
    pub fn new(config: KeynoteConfig) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let api_key = config
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or_else(|| {
                KeynoteError::Configuration(format!(
                    "unknown Keynote API key: set the {API_KEY_ENV} environment variable \
                     or pass an explicit key"
                ))
            })?;

        let mut builder = reqwest::Client::builder();
        match &config.proxy {
            Some(ProxyConfig::Https(url)) => {
                builder = builder.proxy(reqwest::Proxy::https(url)?);
            }
            Some(ProxyConfig::Socks(addr)) => {
                builder = socks_proxy(builder, addr)?;
            }
            None => {}
        }
        let http = builder.build()?;

        let cache_dir = config.cache_dir.unwrap_or_else(std::env::temp_dir);

        Ok(Self {
            api_key,
            base_url: config.base_url,
            mock_input: config.mock_input,
            cache_enabled: config.cache_enabled,
            cache: ResponseCache::new(cache_dir, config.cache_max_age),
            rate_limits: RateLimitState::default(),
            http,
        })
    }

    /// Fetch the parsed response for `command`, from mock input, a fresh cache
    /// entry, or a single HTTP GET (in that order). Every branch records the
    /// rate-limit counters found in the document.
    pub async fn fetch(&mut self, command: &str) -> Result<DashboardDocument> {
        if let Some(path) = self.mock_input.clone() {
            debug!(command, path = %path.display(), "serving response from mock input");
            let document = read_document(&path)?;
            self.rate_limits.update_from(&document);
            return Ok(document);
        }

        if self.cache_enabled && self.cache.is_fresh(command) {
            debug!(command, "serving response from cache");
            let document: DashboardDocument = self.cache.read(command)?;
            self.rate_limits.update_from(&document);
            return Ok(document);
        }

        let url = api_url(&self.base_url, command, &self.api_key, ApiFormat::Json);
        debug!(command, "requesting response from the API");
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(KeynoteError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let document: DashboardDocument = serde_json::from_slice(&body)?;
        self.cache.write(command, &document)?;
        self.rate_limits.update_from(&document);
        Ok(document)
    }

    /// The raw dashboard document.
    pub async fn dashboard(&mut self) -> Result<DashboardDocument> {
        self.fetch(DASHBOARD_COMMAND).await
    }

    /// Every measurement alias mapped to its id, in document order
    /// (last occurrence wins on duplicates).
    pub async fn measurement_slots(&mut self) -> Result<IndexMap<String, String>> {
        Ok(self.dashboard().await?.measurement_slots())
    }

    /// Availability figures for `alias` by time-range name; empty if unknown.
    pub async fn avail_data(&mut self, alias: &str) -> Result<IndexMap<String, String>> {
        Ok(self.dashboard().await?.avail_data(alias))
    }

    /// Response-time figures for `alias` by time-range name; empty if unknown.
    pub async fn perf_data(&mut self, alias: &str) -> Result<IndexMap<String, String>> {
        Ok(self.dashboard().await?.perf_data(alias))
    }

    /// Warning/critical threshold figures for `alias`; empty if unknown.
    pub async fn threshold_data(&mut self, alias: &str) -> Result<IndexMap<String, String>> {
        Ok(self.dashboard().await?.threshold_data(alias))
    }

    /// Current rate-limit counters; both `None` until first populated.
    pub fn remaining_calls(&self) -> RateLimitState {
        self.rate_limits
    }
}

fn read_document(path: &Path) -> Result<DashboardDocument> {
    let raw = fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}

#[cfg(feature = "socks")]
fn socks_proxy(builder: reqwest::ClientBuilder, addr: &str) -> Result<reqwest::ClientBuilder> {
    Ok(builder.proxy(reqwest::Proxy::all(format!("socks5://{addr}"))?))
}

#[cfg(not(feature = "socks"))]
fn socks_proxy(_builder: reqwest::ClientBuilder, addr: &str) -> Result<reqwest::ClientBuilder> {
    Err(KeynoteError::Configuration(format!(
        "unable to use SOCKS proxy server {addr}: rebuild with the 'socks' feature"
    )))
}
