//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `endpoints` - List known resource names
//! - `get` - Fetch items by id
//! - `index` - Fetch items matching a query
//! - `search` - Full-text search
//! - `count` - Count matching items
//! - `fields` - List a resource's fields
//! - `page` - Page through every matching item

mod commands;
mod runner;

pub use commands::{parse_filter, parse_order, Cli, Commands, OutputFormat, QueryArgs};
pub use runner::Runner;
