//! Encoder types and traits

use crate::error::Result;
use crate::options::CompiledQuery;
use crate::types::{Method, WireFormat};

/// Where the encoded query travels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Request body (sent with POST)
    Body,
    /// URL query string (sent with GET)
    QueryString,
}

impl Placement {
    /// HTTP method matching this placement
    pub fn method(self) -> Method {
        match self {
            Placement::Body => Method::POST,
            Placement::QueryString => Method::GET,
        }
    }
}

/// Strategy turning a compiled query into its wire form
pub trait QueryEncoder: Send + Sync {
    /// Encode the query. Every component present in `query` must appear
    /// in the output.
    fn encode(&self, query: &CompiledQuery) -> String;

    /// Reject queries this grammar cannot carry without changing their
    /// meaning. Runs before any request is built.
    fn check(&self, _query: &CompiledQuery) -> Result<()> {
        Ok(())
    }

    /// Where the encoded string goes on the request
    fn placement(&self) -> Placement;

    /// Content type of the encoded string when sent as a body
    fn content_type(&self) -> &'static str {
        "text/plain"
    }
}

/// Build the encoder for a configured wire format
pub fn encoder_for(format: WireFormat) -> Box<dyn QueryEncoder> {
    match format {
        WireFormat::Apicalypse => Box::new(super::ApicalypseEncoder),
        WireFormat::QueryString => Box::new(super::QueryStringEncoder),
    }
}
