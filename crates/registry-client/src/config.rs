//! Registry client configuration.
//!
//! # Example
//!
//! ```ignore
//! use registry_client::ClientConfig;
//!
//! let config = ClientConfig::from_env()
//!     .with_token("s3cr3t")
//!     .with_max_retries(3);
//! config.validate()?;
//! ```

use crate::domain::ConfigError;
use reqwest::Url;
use std::env;
use std::fmt;
use std::time::Duration;

/// Upper bound on transport retries.
pub const MAX_RETRIES_LIMIT: u32 = 10;

const DEFAULT_REGISTRY_URL: &str = "http://localhost:8080/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;

/// Connection settings for the registry.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL every collection path is appended to.
    pub registry_url: String,
    /// Bearer token for authenticated requests.
    pub token: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Extra attempts after a retryable failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_backoff: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            user_agent: format!("registry-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("registry_url", &self.registry_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `REGISTRY_URL`: Base URL (default: http://localhost:8080/v1)
    /// - `REGISTRY_TOKEN`: Bearer token (default: none)
    /// - `REGISTRY_TIMEOUT_SECS`: Request timeout (default: 30)
    /// - `REGISTRY_CONNECT_TIMEOUT_SECS`: Connect timeout (default: 5)
    /// - `REGISTRY_MAX_RETRIES`: Retries after retryable failures (default: 2)
    /// - `REGISTRY_RETRY_BACKOFF_MS`: Initial retry delay (default: 200)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reading from `lookup`.
    ///
    /// Unparseable numbers fall back to their defaults; empty strings count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let number = |key: &str| get(key).and_then(|v| v.trim().parse::<u64>().ok());
        let defaults = Self::default();

        Self {
            registry_url: get("REGISTRY_URL").unwrap_or(defaults.registry_url),
            token: get("REGISTRY_TOKEN"),
            timeout: number("REGISTRY_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            connect_timeout: number("REGISTRY_CONNECT_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            max_retries: number("REGISTRY_MAX_RETRIES")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.max_retries),
            retry_backoff: number("REGISTRY_RETRY_BACKOFF_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_backoff),
            user_agent: defaults.user_agent,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.registry_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.registry_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                self.registry_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout { field: "timeout" });
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                field: "connect_timeout",
            });
        }

        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::TooManyRetries {
                count: self.max_retries,
                max: MAX_RETRIES_LIMIT,
            });
        }

        Ok(())
    }

    /// Builder-style method to set the registry URL
    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self
    }

    /// Builder-style method to set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builder-style method to set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the retry count
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Builder-style method to set the initial retry delay
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}
