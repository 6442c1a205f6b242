//! Client configuration
//!
//! `ClientConfig` is loaded from YAML (a string or a file), then
//! optionally overridden from the environment:
//!
//! ```yaml
//! base_url: https://api.igdb.com/v4
//! api_key: your-key
//! tier: pro
//! wire_format: apicalypse
//! http:
//!   timeout_seconds: 20
//!   max_retries: 2
//!   rate_limit:
//!     requests_per_second: 4
//!     burst_size: 4
//! ```
//!
//! | Variable           | Field         |
//! |--------------------|---------------|
//! | `IGDB_API_KEY`     | `api_key`     |
//! | `IGDB_BASE_URL`    | `base_url`    |
//! | `IGDB_TIER`        | `tier`        |
//! | `IGDB_WIRE_FORMAT` | `wire_format` |

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, Tier, WireFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "IGDB_API_KEY";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "IGDB_BASE_URL";
/// Environment variable overriding the tier
pub const ENV_TIER: &str = "IGDB_TIER";
/// Environment variable overriding the wire format
pub const ENV_WIRE_FORMAT: &str = "IGDB_WIRE_FORMAT";

// ============================================================================
// Client Config
// ============================================================================

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL all endpoints are relative to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key, sent on every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Header carrying the API key
    #[serde(default = "default_key_header")]
    pub key_header: String,

    /// Account tier, controls the maximum limit
    #[serde(default)]
    pub tier: Tier,

    /// Query encoding
    #[serde(default)]
    pub wire_format: WireFormat,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            key_header: default_key_header(),
            tier: Tier::default(),
            wire_format: WireFormat::default(),
            http: HttpConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.igdb.com/v4".to_string()
}

fn default_key_header() -> String {
    "user-key".to_string()
}

impl ClientConfig {
    /// Default config using `api_key`
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse client config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Defaults overridden from the process environment
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(tier) = get(ENV_TIER) {
            self.tier = tier.parse()?;
        }
        if let Some(format) = get(ENV_WIRE_FORMAT) {
            self.wire_format = format.parse()?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)?;
        if self.key_header.trim().is_empty() {
            return Err(Error::config("key_header cannot be empty"));
        }
        if self.http.timeout_seconds == 0 {
            return Err(Error::config("http.timeout_seconds must be positive"));
        }
        Ok(())
    }

    /// Transport settings derived from this config
    pub fn to_http_config(&self) -> HttpClientConfig {
        let backoff = &self.http.retry_backoff;
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                backoff.backoff_type,
                Duration::from_millis(backoff.initial_ms),
                Duration::from_millis(backoff.max_ms),
            );

        builder = match &self.http.rate_limit {
            Some(limit) if limit.requests_per_second > 0 => builder.rate_limit(limit.clone()),
            _ => builder.no_rate_limit(),
        };

        if let Some(key) = &self.api_key {
            builder = builder.header(self.key_header.clone(), key.clone());
        }

        builder.build()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the header carrying the API key
    pub fn key_header(mut self, header: impl Into<String>) -> Self {
        self.config.key_header = header.into();
        self
    }

    /// Set the account tier
    pub fn tier(mut self, tier: Tier) -> Self {
        self.config.tier = tier;
        self
    }

    /// Set the query encoding
    pub fn wire_format(mut self, format: WireFormat) -> Self {
        self.config.wire_format = format;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.http.timeout_seconds = timeout.as_secs().max(1);
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.http.max_retries = retries;
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.http.rate_limit = None;
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting; `None` or zero requests per second disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

#[allow(clippy::unnecessary_wraps)]
fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    250
}

fn default_max_ms() -> u64 {
    30_000
}
