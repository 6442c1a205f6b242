//! Query-string encoder
//!
//! The legacy IGDB URL grammar:
//!
//! ```text
//! search=zelda&fields=name,cover&filter[platforms][eq]=48&filter[rating][gt]=80
//!     &order=popularity:desc&limit=5&offset=10
//! ```
//!
//! Set-operator values are comma-joined, so `check` rejects any set value
//! that contains a comma.

use super::types::{Placement, QueryEncoder};
use crate::error::{Error, Result};
use crate::options::{Arity, CompiledQuery, FieldSelection, Filter, Operator};
use url::form_urlencoded;

/// Encodes queries as URL parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryStringEncoder;

impl QueryEncoder for QueryStringEncoder {
    fn encode(&self, query: &CompiledQuery) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());

        if let Some(search) = &query.search {
            out.append_pair("search", search);
        }

        match &query.fields {
            Some(FieldSelection::All) => {
                out.append_pair("fields", "*");
            }
            Some(FieldSelection::Named(names)) => {
                out.append_pair("fields", &names.join(","));
            }
            None => {}
        }

        for filter in &query.filters {
            let key = format!("filter[{}][{}]", filter.field, filter.operator.short_name());
            let value = match filter.operator.arity() {
                Arity::None => "1".to_string(),
                Arity::One | Arity::Many => filter.values.join(","),
            };
            out.append_pair(&key, &value);
        }

        if let Some(order) = &query.sort {
            out.append_pair(
                "order",
                &format!("{}:{}", order.field, order.direction.as_str()),
            );
        }

        if let Some(limit) = query.limit {
            out.append_pair("limit", &limit.to_string());
        }

        if let Some(offset) = query.offset {
            out.append_pair("offset", &offset.to_string());
        }

        out.finish()
    }

    fn check(&self, query: &CompiledQuery) -> Result<()> {
        for filter in &query.filters {
            if filter.operator.arity() != Arity::Many {
                continue;
            }
            if let Some(bad) = filter.values.iter().find(|v| v.contains(',')) {
                return Err(Error::invalid_operator(
                    &filter.field,
                    filter.operator,
                    format!("value '{bad}' contains a comma, the query-string set separator"),
                ));
            }
        }
        Ok(())
    }

    fn placement(&self) -> Placement {
        Placement::QueryString
    }

    fn content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }
}

impl QueryStringEncoder {
    /// Recover the filter list from an encoded query string, in order.
    /// Non-filter parameters are ignored.
    pub fn decode_filters(encoded: &str) -> Result<Vec<Filter>> {
        let mut filters = Vec::new();

        for (key, value) in form_urlencoded::parse(encoded.as_bytes()) {
            let Some(rest) = key.strip_prefix("filter[") else {
                continue;
            };
            let (field, op) = rest
                .strip_suffix(']')
                .and_then(|inner| inner.split_once("]["))
                .ok_or_else(|| Error::invalid_option("filter", format!("malformed key '{key}'")))?;
            let operator: Operator = op.parse()?;

            let values = match operator.arity() {
                Arity::None => Vec::new(),
                Arity::One => vec![value.into_owned()],
                Arity::Many => value.split(',').map(str::to_string).collect(),
            };

            filters.push(Filter {
                field: field.to_string(),
                operator,
                values,
            });
        }

        Ok(filters)
    }
}
