//! Transport seam
//!
//! The core never talks to the network directly. It hands a `WireRequest`
//! to a `Transport` and gets back the raw status, headers and body.
//! Retries, timeouts, rate limiting and header injection are transport
//! concerns; `HttpClient` is the reqwest-backed implementation.

use crate::error::Result;
use crate::types::{Endpoint, Method};
use async_trait::async_trait;
use std::collections::HashMap;

/// A fully encoded request, ready for the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the transport's base URL
    pub endpoint: Endpoint,
    /// Encoded URL query string (without the leading `?`)
    pub query: Option<String>,
    /// Encoded request body
    pub body: Option<String>,
    /// Content type of `body`
    pub content_type: &'static str,
}

impl WireRequest {
    /// A request with neither query nor body
    pub fn new(method: Method, endpoint: Endpoint) -> Self {
        Self {
            method,
            endpoint,
            query: None,
            body: None,
            content_type: "text/plain",
        }
    }
}

/// What came back from the server, before classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, lower-cased names
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// A response with a status and body and no headers
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read a response into memory
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(Self {
            status,
            headers,
            body,
        })
    }
}

/// Sends wire requests. One call is one network round trip as far as
/// the caller is concerned.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the raw response. Non-2xx statuses
    /// are returned, not turned into errors.
    async fn execute(&self, request: WireRequest) -> Result<RawResponse>;
}
