//! Option types
//!
//! A `QueryOption` is one atomic query instruction. Constructors never
//! fail: bad values are representable and rejected by the compiler.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Operator
// ============================================================================

/// Filter operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    In,
    NotIn,
    Exists,
    NotExists,
    ContainsAtLeast,
    ContainsAll,
    ContainsNone,
}

/// How many values an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No value (existence checks)
    None,
    /// Exactly one value
    One,
    /// One or more values
    Many,
}

/// What kind of value an operator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Anything the server understands
    Any,
    /// Must parse as a number
    Numeric,
}

impl Operator {
    /// All operators, in declaration order
    pub const ALL: [Operator; 13] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::In,
        Operator::NotIn,
        Operator::Exists,
        Operator::NotExists,
        Operator::ContainsAtLeast,
        Operator::ContainsAll,
        Operator::ContainsNone,
    ];

    /// Number of values this operator takes
    pub fn arity(self) -> Arity {
        match self {
            Operator::Exists | Operator::NotExists => Arity::None,
            Operator::Equals
            | Operator::NotEquals
            | Operator::GreaterThan
            | Operator::LessThan
            | Operator::GreaterOrEqual
            | Operator::LessOrEqual => Arity::One,
            Operator::In
            | Operator::NotIn
            | Operator::ContainsAtLeast
            | Operator::ContainsAll
            | Operator::ContainsNone => Arity::Many,
        }
    }

    /// Value expectation for this operator
    pub fn value_kind(self) -> ValueKind {
        match self {
            Operator::GreaterThan
            | Operator::LessThan
            | Operator::GreaterOrEqual
            | Operator::LessOrEqual => ValueKind::Numeric,
            _ => ValueKind::Any,
        }
    }

    /// Short name, as used by the legacy query-string API and the CLI
    pub fn short_name(self) -> &'static str {
        match self {
            Operator::Equals => "eq",
            Operator::NotEquals => "not_eq",
            Operator::GreaterThan => "gt",
            Operator::LessThan => "lt",
            Operator::GreaterOrEqual => "gte",
            Operator::LessOrEqual => "lte",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Exists => "exists",
            Operator::NotExists => "not_exists",
            Operator::ContainsAtLeast => "any",
            Operator::ContainsAll => "all",
            Operator::ContainsNone => "none",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.short_name() == s)
            .ok_or_else(|| Error::invalid_option("filter", format!("unknown operator '{s}'")))
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// `asc` or `desc`
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            other => Err(Error::invalid_option(
                "order",
                format!("unknown direction '{other}'"),
            )),
        }
    }
}

// ============================================================================
// Filter / Order
// ============================================================================

/// A single filter clause
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub operator: Operator,
    pub values: Vec<String>,
}

/// Sort instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

// ============================================================================
// QueryOption
// ============================================================================

/// One composable query instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOption {
    /// Field selection; `"*"` selects every field
    Fields(Vec<String>),
    /// Filter clause; filters accumulate
    Filter(Filter),
    /// Sort order
    Order(Order),
    /// Page size
    Limit(i64),
    /// Number of items to skip
    Offset(i64),
    /// Full-text search query
    Search(String),
}

impl QueryOption {
    /// Select fields to return
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(names.into_iter().map(Into::into).collect())
    }

    /// Filter with a single value
    pub fn filter(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self::filter_many(field, operator, [value.into()])
    }

    /// Filter with any number of values
    pub fn filter_many<I, S>(field: impl Into<String>, operator: Operator, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Filter(Filter {
            field: field.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Filter without a value (`Exists`, `NotExists`)
    pub fn filter_unary(field: impl Into<String>, operator: Operator) -> Self {
        Self::Filter(Filter {
            field: field.into(),
            operator,
            values: Vec::new(),
        })
    }

    /// Sort by a field
    pub fn order(field: impl Into<String>, direction: Direction) -> Self {
        Self::Order(Order {
            field: field.into(),
            direction,
        })
    }

    /// Limit the number of results
    pub fn limit(n: i64) -> Self {
        Self::Limit(n)
    }

    /// Skip the first `n` results
    pub fn offset(n: i64) -> Self {
        Self::Offset(n)
    }

    /// Full-text search
    pub fn search(query: impl Into<String>) -> Self {
        Self::Search(query.into())
    }

    /// Option kind, used in logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            QueryOption::Fields(_) => "fields",
            QueryOption::Filter(_) => "filter",
            QueryOption::Order(_) => "order",
            QueryOption::Limit(_) => "limit",
            QueryOption::Offset(_) => "offset",
            QueryOption::Search(_) => "search",
        }
    }

    /// True for `Limit` and `Offset`, which pagination owns
    pub fn is_paging(&self) -> bool {
        matches!(self, QueryOption::Limit(_) | QueryOption::Offset(_))
    }
}

/// Join option groups in order, e.g. a reusable preset followed by
/// call-specific options.
pub fn compose<G, I>(groups: G) -> Vec<QueryOption>
where
    G: IntoIterator<Item = I>,
    I: IntoIterator<Item = QueryOption>,
{
    groups.into_iter().flatten().collect()
}

/// Convert integer ids into filter values
pub fn ids_to_values(ids: &[i64]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

/// Plain decimal number: an optional leading `-`, digits, and an optional
/// fractional part (`42`, `-1.5`). Rejects `+5`, `1e3`, `inf` and `NaN`.
pub fn is_numeric(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}
