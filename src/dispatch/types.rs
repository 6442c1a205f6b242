//! Dispatcher response types

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Metadata kept from the raw response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// HTTP status code
    pub status: u16,
    /// Response headers, lower-cased names
    pub headers: HashMap<String, String>,
}

/// Shape of a classified body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// JSON array
    List,
    /// Single JSON object
    Singleton,
}

/// A successful, classified response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status and headers
    pub meta: ResponseMeta,
    /// Parsed JSON body, never an empty array
    pub body: Value,
}

impl Response {
    /// List or singleton
    pub fn shape(&self) -> BodyShape {
        if self.body.is_array() {
            BodyShape::List
        } else {
            BodyShape::Singleton
        }
    }

    /// Number of items in the body; a singleton counts as one
    pub fn item_count(&self) -> usize {
        match &self.body {
            Value::Array(items) => items.len(),
            _ => 1,
        }
    }

    /// Decode the body as a sequence of `T`. A singleton object becomes a
    /// one-element list.
    pub fn items<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let items = match self.body {
            Value::Array(items) => items,
            single => vec![single],
        };
        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .map_err(|e| Error::invalid_response(format!("cannot decode item: {e}")))
            })
            .collect()
    }

    /// Decode the whole body as `T`
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.body)
            .map_err(|e| Error::invalid_response(format!("cannot decode body: {e}")))
    }
}
