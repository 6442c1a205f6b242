//! Apicalypse encoder
//!
//! The query language IGDB accepts in the request body:
//!
//! ```text
//! search "zelda"; fields name,cover; where platforms = 48 & rating > 80;
//! sort popularity desc; limit 5; offset 10;
//! ```

use super::types::{Placement, QueryEncoder};
use crate::options::{is_numeric, CompiledQuery, FieldSelection, Filter, Operator};

/// Encodes queries as Apicalypse clauses
#[derive(Debug, Clone, Copy, Default)]
pub struct ApicalypseEncoder;

impl QueryEncoder for ApicalypseEncoder {
    fn encode(&self, query: &CompiledQuery) -> String {
        let mut clauses = Vec::new();

        if let Some(search) = &query.search {
            clauses.push(format!("search {};", quote(search)));
        }

        match &query.fields {
            Some(FieldSelection::All) => clauses.push("fields *;".to_string()),
            Some(FieldSelection::Named(names)) => {
                clauses.push(format!("fields {};", names.join(",")));
            }
            None => {}
        }

        if !query.filters.is_empty() {
            let conditions: Vec<String> = query.filters.iter().map(encode_filter).collect();
            clauses.push(format!("where {};", conditions.join(" & ")));
        }

        if let Some(order) = &query.sort {
            clauses.push(format!("sort {} {};", order.field, order.direction.as_str()));
        }

        if let Some(limit) = query.limit {
            clauses.push(format!("limit {limit};"));
        }

        if let Some(offset) = query.offset {
            clauses.push(format!("offset {offset};"));
        }

        clauses.join(" ")
    }

    fn placement(&self) -> Placement {
        Placement::Body
    }
}

fn encode_filter(filter: &Filter) -> String {
    let field = &filter.field;
    let first = || filter.values.first().map(|v| literal(v)).unwrap_or_default();
    let group = |open: char, close: char| {
        let items: Vec<String> = filter.values.iter().map(|v| literal(v)).collect();
        format!("{open}{}{close}", items.join(","))
    };

    match filter.operator {
        Operator::Equals => format!("{field} = {}", first()),
        Operator::NotEquals => format!("{field} != {}", first()),
        Operator::GreaterThan => format!("{field} > {}", first()),
        Operator::LessThan => format!("{field} < {}", first()),
        Operator::GreaterOrEqual => format!("{field} >= {}", first()),
        Operator::LessOrEqual => format!("{field} <= {}", first()),
        // `(..)` matches any listed value; on array fields that is
        // "contains at least one"
        Operator::In | Operator::ContainsAtLeast => format!("{field} = {}", group('(', ')')),
        Operator::NotIn | Operator::ContainsNone => format!("{field} != {}", group('(', ')')),
        Operator::ContainsAll => format!("{field} = {}", group('[', ']')),
        Operator::Exists => format!("{field} != null"),
        Operator::NotExists => format!("{field} = null"),
    }
}

/// Render a value: numbers, booleans and null stay bare, the rest is quoted
fn literal(value: &str) -> String {
    let bare = matches!(value, "null" | "true" | "false") || is_numeric(value);
    if bare {
        value.to_string()
    } else {
        quote(value)
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
