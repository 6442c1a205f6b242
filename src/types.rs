//! Common types used throughout igdb-query
//!
//! Shared definitions used by the compiler, the dispatcher, the HTTP
//! transport and the configuration layer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Identifier of an IGDB object. Signed so that callers can pass
/// negative values and get `NegativeId` instead of a silent wrap.
pub type Id = i64;

// ============================================================================
// Endpoint
// ============================================================================

/// Opaque path segment naming a resource collection (e.g. `games`).
///
/// Never validated; the transport joins it onto its base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create an endpoint from a path segment
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The raw path segment
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A sub-path of this endpoint, e.g. `games/count`
    pub fn child(&self, segment: &str) -> Endpoint {
        Endpoint(format!("{}/{}", self.0.trim_end_matches('/'), segment))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Endpoint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// Account Tier
// ============================================================================

/// Account class controlling the maximum allowed limit value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Standard accounts, limit up to 50
    #[default]
    Standard,
    /// Pro accounts, limit up to 3000
    Pro,
}

impl Tier {
    /// Largest limit accepted for this tier
    pub fn max_limit(self) -> u32 {
        match self {
            Tier::Standard => 50,
            Tier::Pro => 3000,
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Tier::Standard),
            "pro" => Ok(Tier::Pro),
            other => Err(crate::Error::config(format!("unknown tier '{other}'"))),
        }
    }
}

// ============================================================================
// Wire Format
// ============================================================================

/// Which query encoding the client speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    /// Apicalypse query language in the request body
    #[default]
    Apicalypse,
    /// Legacy URL query parameters (`filter[field][op]=value`)
    QueryString,
}

impl std::str::FromStr for WireFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apicalypse" => Ok(WireFormat::Apicalypse),
            "query_string" | "querystring" => Ok(WireFormat::QueryString),
            other => Err(crate::Error::config(format!("unknown wire format '{other}'"))),
        }
    }
}

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
