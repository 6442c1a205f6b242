//! CLI commands and argument parsing

use crate::error::{Error, Result};
use crate::options::{Arity, Direction, Operator, QueryOption};
use crate::types::{Tier, WireFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Query the IGDB API from the command line
#[derive(Parser, Debug)]
#[command(name = "igdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API key
    #[arg(long, global = true, env = "IGDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Account tier (standard, pro)
    #[arg(long, global = true)]
    pub tier: Option<Tier>,

    /// Query encoding (apicalypse, query_string)
    #[arg(long, global = true)]
    pub wire_format: Option<WireFormat>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known resource names
    Endpoints,

    /// Fetch items by id
    Get {
        /// Resource name (see `endpoints`)
        resource: String,

        /// Item ids
        #[arg(required = true)]
        ids: Vec<i64>,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Fetch items matching the query
    Index {
        /// Resource name (see `endpoints`)
        resource: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Full-text search
    Search {
        /// Resource name (see `endpoints`)
        resource: String,

        /// Search term
        term: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Count items matching the query
    Count {
        /// Resource name (see `endpoints`)
        resource: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// List the fields of a resource
    Fields {
        /// Resource name (see `endpoints`)
        resource: String,
    },

    /// Page through every matching item
    Page {
        /// Resource name (see `endpoints`)
        resource: String,

        /// Page size
        #[arg(long, default_value = "10")]
        page_size: i64,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u64>,

        #[command(flatten)]
        query: QueryArgs,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Query options shared by the data commands
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Fields to return, comma-separated (`*` for all)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Filter as `field:op[:value]`, repeatable. Set operators take
    /// comma-separated values: `platforms:in:48,49`
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Sort as `field[:asc|desc]`
    #[arg(long)]
    pub order: Option<String>,

    /// Maximum number of items
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Items to skip
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<i64>,
}

impl QueryArgs {
    /// Build the option list, in a fixed order
    pub fn to_options(&self) -> Result<Vec<QueryOption>> {
        let mut options = Vec::new();

        if !self.fields.is_empty() {
            options.push(QueryOption::fields(self.fields.iter().map(|f| f.trim())));
        }
        for filter in &self.filters {
            options.push(parse_filter(filter)?);
        }
        if let Some(order) = &self.order {
            options.push(parse_order(order)?);
        }
        if let Some(limit) = self.limit {
            options.push(QueryOption::limit(limit));
        }
        if let Some(offset) = self.offset {
            options.push(QueryOption::offset(offset));
        }

        Ok(options)
    }
}

/// Parse `field:op[:value]`
pub fn parse_filter(input: &str) -> Result<QueryOption> {
    let mut parts = input.splitn(3, ':');
    let field = parts.next().unwrap_or_default().trim();
    let operator: Operator = parts
        .next()
        .ok_or_else(|| {
            Error::invalid_option("filter", format!("expected field:op[:value], got '{input}'"))
        })?
        .parse()?;
    let value = parts.next();

    let option = match (operator.arity(), value) {
        (Arity::None, None) => QueryOption::filter_unary(field, operator),
        (Arity::One, Some(value)) => QueryOption::filter(field, operator, value),
        (Arity::Many, Some(values)) => {
            QueryOption::filter_many(field, operator, values.split(',').map(str::trim))
        }
        _ => {
            return Err(Error::invalid_operator(
                field,
                operator,
                format!("wrong number of values in '{input}'"),
            ))
        }
    };
    Ok(option)
}

/// Parse `field[:asc|desc]`
pub fn parse_order(input: &str) -> Result<QueryOption> {
    let (field, direction) = match input.split_once(':') {
        Some((field, direction)) => (field, direction.parse::<Direction>()?),
        None => (input, Direction::Ascending),
    };
    Ok(QueryOption::order(field.trim(), direction))
}
