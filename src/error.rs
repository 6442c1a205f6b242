//! Error types for igdb-query
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Validation errors are produced before any request is sent; transport
//! errors carry whatever the server or the HTTP stack reported.

use thiserror::Error;

/// The main error type for igdb-query
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Query Validation Errors
    // ============================================================================
    #[error("{option} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        option: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid operator '{operator}' on field '{field}': {message}")]
    InvalidOperator {
        field: String,
        operator: String,
        message: String,
    },

    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Invalid {option} option: {message}")]
    InvalidOption {
        option: &'static str,
        message: String,
    },

    #[error("Negative ID: {id}")]
    NegativeId { id: i64 },

    #[error("Empty ID list")]
    EmptyIds,

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("No results")]
    NoResults,

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Pagination / Client Errors
    // ============================================================================
    #[error("Pagination over '{endpoint}' already failed: {reason}")]
    PaginationFailed { endpoint: String, reason: String },

    #[error("Unknown resource: {name}")]
    UnknownResource { name: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Configuration / I/O Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an out-of-range error
    pub fn out_of_range(option: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            option,
            value,
            min,
            max,
        }
    }

    /// Create an invalid operator error
    pub fn invalid_operator(
        field: impl Into<String>,
        operator: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidOperator {
            field: field.into(),
            operator: operator.to_string(),
            message: message.into(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(option: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Errors raised while compiling options or checking ids, before any I/O
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::OutOfRange { .. }
                | Error::InvalidOperator { .. }
                | Error::EmptyQuery
                | Error::InvalidOption { .. }
                | Error::NegativeId { .. }
                | Error::EmptyIds
        )
    }

    /// Check if this is the "nothing matched" signal
    pub fn is_no_results(&self) -> bool {
        matches!(self, Error::NoResults)
    }
}

/// Statuses the transport retries before returning the response
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(
        status,
        429 | 500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

/// Result type alias for igdb-query
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
