//! Option compiler
//!
//! Folds an ordered option list into a `CompiledQuery`. Scalar options
//! (fields, order, limit, offset, search) are last-write-wins; filters
//! accumulate in encounter order.
//!
//! Field names are identifiers or dotted paths (`involved_companies.company`);
//! anything else is rejected so a name can never carry its own clauses.

use super::types::{is_numeric, Arity, Filter, Order, QueryOption, ValueKind};
use crate::error::{Error, Result};
use crate::types::Tier;
use serde::Serialize;
use tracing::trace;

/// The "all fields" marker
pub const ALL_FIELDS: &str = "*";

/// Which fields a query returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldSelection {
    /// Every field (`*`)
    All,
    /// Named fields, dotted paths allowed
    Named(Vec<String>),
}

/// Validated, normalized query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    pub fields: Option<FieldSelection>,
    pub filters: Vec<Filter>,
    pub sort: Option<Order>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub search: Option<String>,
}

impl CompiledQuery {
    /// True when nothing was set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Validates and merges options for a given account tier
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    tier: Tier,
}

impl Compiler {
    /// Create a compiler enforcing the limits of `tier`
    pub fn new(tier: Tier) -> Self {
        Self { tier }
    }

    /// Account tier this compiler enforces
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Compile an ordered option sequence
    pub fn compile<'a, I>(&self, options: I) -> Result<CompiledQuery>
    where
        I: IntoIterator<Item = &'a QueryOption>,
    {
        let mut query = CompiledQuery::default();

        for option in options {
            trace!(kind = option.kind(), "compiling option");
            match option {
                QueryOption::Fields(names) => {
                    query.fields = Some(compile_fields(names)?);
                }
                QueryOption::Filter(filter) => {
                    check_filter(filter)?;
                    query.filters.push(filter.clone());
                }
                QueryOption::Order(order) => {
                    check_field_path("order", &order.field)?;
                    query.sort = Some(order.clone());
                }
                QueryOption::Limit(n) => {
                    let max = i64::from(self.tier.max_limit());
                    if *n < 1 || *n > max {
                        return Err(Error::out_of_range("limit", *n, 1, max));
                    }
                    query.limit = Some(*n as u32);
                }
                QueryOption::Offset(n) => {
                    let max = i64::from(u32::MAX);
                    if *n < 0 || *n > max {
                        return Err(Error::out_of_range("offset", *n, 0, max));
                    }
                    query.offset = Some(*n as u32);
                }
                QueryOption::Search(text) => {
                    if text.trim().is_empty() {
                        return Err(Error::EmptyQuery);
                    }
                    query.search = Some(text.clone());
                }
            }
        }

        Ok(query)
    }
}

fn compile_fields(names: &[String]) -> Result<FieldSelection> {
    if names.is_empty() {
        return Err(Error::invalid_option("fields", "no field names given"));
    }
    if names.iter().any(|n| n == ALL_FIELDS) {
        if names.len() > 1 {
            return Err(Error::invalid_option(
                "fields",
                "'*' must be the only field when present",
            ));
        }
        return Ok(FieldSelection::All);
    }
    for name in names {
        // `cover.*` selects every field of a sub-object
        let path = name.strip_suffix(".*").unwrap_or(name);
        check_field_path("fields", path)?;
    }
    Ok(FieldSelection::Named(names.to_vec()))
}

fn check_filter(filter: &Filter) -> Result<()> {
    let Filter {
        field,
        operator,
        values,
    } = filter;

    check_field_path("filter", field)?;

    let count = values.len();
    let arity_ok = match operator.arity() {
        Arity::None => count == 0,
        Arity::One => count == 1,
        Arity::Many => count >= 1,
    };
    if !arity_ok {
        let expected = match operator.arity() {
            Arity::None => "no values",
            Arity::One => "exactly one value",
            Arity::Many => "at least one value",
        };
        return Err(Error::invalid_operator(
            field,
            operator,
            format!("expects {expected}, got {count}"),
        ));
    }

    if operator.value_kind() == ValueKind::Numeric {
        if let Some(bad) = values.iter().find(|v| !is_numeric(v)) {
            return Err(Error::invalid_operator(
                field,
                operator,
                format!("expects a numeric value, got '{bad}'"),
            ));
        }
    }

    Ok(())
}

/// `[A-Za-z0-9_]+` segments joined by `.`
fn check_field_path(option: &'static str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_option(option, "field name is empty"));
    }
    let valid = name.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    });
    if !valid {
        return Err(Error::invalid_option(
            option,
            format!("invalid field name '{name}'"),
        ));
    }
    Ok(())
}
