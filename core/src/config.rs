//! Backend client configuration, resolved once at startup and passed into the backend.

use crate::error::{CoreError, CoreResult};
use std::time::Duration;
use url::Url;

pub const BASE_URL_ENV: &str = "CONTENT_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "CONTENT_API_TIMEOUT_SECS";
pub const TOKEN_ENV: &str = "CONTENT_API_TOKEN";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout: Duration) -> CoreResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CoreError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        match base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(CoreError::Config(format!(
                    "unsupported base URL scheme '{}'",
                    other
                )))
            }
        }
        if base_url.host_str().is_none() {
            return Err(CoreError::Config("base URL missing host".to_string()));
        }
        if timeout.is_zero() {
            return Err(CoreError::Config("timeout must be non-zero".to_string()));
        }
        Ok(Self { base_url, timeout })
    }

    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CoreResult<Self> {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| CoreError::Config(format!("{} is not set", BASE_URL_ENV)))?;
        let timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    CoreError::Config(format!("{} must be whole seconds, got '{}'", TIMEOUT_ENV, raw))
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };
        Self::new(base_url.trim(), timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base}/content/{id}`, with the id percent-encoded as a single path segment.
    pub fn content_url(&self, id: &str) -> CoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CoreError::Config("base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push("content")
            .push(id);
        Ok(url)
    }
}
