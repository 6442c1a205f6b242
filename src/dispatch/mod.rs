//! Request dispatcher module
//!
//! Turns an endpoint plus a compiled query into a `WireRequest`, runs it
//! through the `Transport`, and classifies what comes back:
//!
//! | Raw response                    | Result            |
//! |---------------------------------|-------------------|
//! | non-2xx status                  | `HttpStatus`      |
//! | empty body, or `[]`             | `NoResults`       |
//! | not a JSON array or object      | `InvalidResponse` |
//! | anything else                   | `Ok(Response)`    |
//!
//! The dispatcher keeps no state between calls.

mod types;

pub use types::{BodyShape, Response, ResponseMeta};

use crate::encode::{Placement, QueryEncoder};
use crate::error::{Error, Result};
use crate::options::{CompiledQuery, Compiler, QueryOption};
use crate::transport::{RawResponse, Transport, WireRequest};
use crate::types::{Endpoint, Tier};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Stateless request dispatcher. Clones share the same transport and
/// encoder.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    encoder: Arc<dyn QueryEncoder>,
    compiler: Compiler,
}

impl Dispatcher {
    /// Create a dispatcher
    pub fn new(transport: Arc<dyn Transport>, encoder: Arc<dyn QueryEncoder>, tier: Tier) -> Self {
        Self {
            transport,
            encoder,
            compiler: Compiler::new(tier),
        }
    }

    /// The compiler enforcing this dispatcher's tier
    pub fn compiler(&self) -> Compiler {
        self.compiler
    }

    /// Compile options with this dispatcher's tier and check that the
    /// configured wire format can carry the result
    pub fn compile<'a, I>(&self, options: I) -> Result<CompiledQuery>
    where
        I: IntoIterator<Item = &'a QueryOption>,
    {
        let query = self.compiler.compile(options)?;
        self.encoder.check(&query)?;
        Ok(query)
    }

    /// Encode a query for `endpoint` without sending it
    pub fn build_request(&self, endpoint: &Endpoint, query: &CompiledQuery) -> WireRequest {
        let placement = self.encoder.placement();
        let encoded = self.encoder.encode(query);
        let mut request = WireRequest::new(placement.method(), endpoint.clone());
        request.content_type = self.encoder.content_type();

        if !encoded.is_empty() {
            match placement {
                Placement::Body => request.body = Some(encoded),
                Placement::QueryString => request.query = Some(encoded),
            }
        }

        request
    }

    /// Send a query and classify the response
    pub async fn fetch(&self, endpoint: &Endpoint, query: &CompiledQuery) -> Result<Response> {
        self.encoder.check(query)?;
        let request = self.build_request(endpoint, query);
        debug!(
            endpoint = %endpoint,
            method = ?request.method,
            "dispatching query"
        );
        let raw = self.transport.execute(request).await?;
        classify(raw)
    }

    /// Count the items matching `query` via `{endpoint}/count`
    pub async fn fetch_count(&self, endpoint: &Endpoint, query: &CompiledQuery) -> Result<u64> {
        #[derive(Deserialize)]
        struct Count {
            count: u64,
        }

        let response = self.fetch(&endpoint.child("count"), query).await?;
        let count: Count = response.decode()?;
        Ok(count.count)
    }

    /// List the field names of an endpoint via `{endpoint}/meta`
    pub async fn fetch_fields(&self, endpoint: &Endpoint) -> Result<Vec<String>> {
        let response = self
            .fetch(&endpoint.child("meta"), &CompiledQuery::default())
            .await?;
        response.items()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tier", &self.compiler.tier())
            .field("placement", &self.encoder.placement())
            .finish_non_exhaustive()
    }
}

/// Classify a raw transport response
pub fn classify(raw: RawResponse) -> Result<Response> {
    if !raw.is_success() {
        return Err(Error::http_status(raw.status, raw.body));
    }

    if raw.body.trim().is_empty() {
        return Err(Error::NoResults);
    }

    let body: Value = serde_json::from_str(&raw.body)
        .map_err(|e| Error::invalid_response(format!("malformed JSON: {e}")))?;

    match &body {
        Value::Array(items) if items.is_empty() => return Err(Error::NoResults),
        Value::Array(_) | Value::Object(_) => {}
        other => {
            return Err(Error::invalid_response(format!(
                "expected a JSON array or object, got {other}"
            )))
        }
    }

    Ok(Response {
        meta: ResponseMeta {
            status: raw.status,
            headers: raw.headers,
        },
        body,
    })
}
