// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # igdb-query
//!
//! Composable query options and offset pagination for the IGDB REST API.
//!
//! ## Features
//!
//! - **Query Options**: fields, filters, order, limit, offset and search,
//!   composed in order and validated before any I/O
//! - **Two Wire Formats**: Apicalypse request bodies, or legacy
//!   `filter[field][op]` query strings
//! - **Offset Pagination**: page through any endpoint with a fixed page
//!   size until a short page ends the walk
//! - **Typed Resources**: `Resource<T>` decodes into your own types
//! - **Resilient Transport**: retries, backoff and rate limiting over reqwest
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use igdb_query::{Client, ClientConfig, Direction, Operator, QueryOption, Result};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Game {
//!     id: i64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(ClientConfig::from_env()?)?;
//!
//!     let top = [
//!         QueryOption::fields(["name"]),
//!         QueryOption::filter("rating", Operator::GreaterOrEqual, "90"),
//!         QueryOption::order("rating", Direction::Descending),
//!     ];
//!
//!     let mut pages = client.paginate("games", 50, &top)?;
//!     loop {
//!         let page = pages.fetch_page::<Game>().await?;
//!         for game in &page.items {
//!             println!("{} {}", game.id, game.name);
//!         }
//!         if !page.more_items {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  Client (endpoint table)  ──▶  Resource<T> / Pagination   │
//! └───────────────────────────────┬───────────────────────────┘
//!                                 │
//! ┌──────────────┬────────────────┴──┬─────────────────────────┐
//! │   Options    │      Encode       │        Dispatch         │
//! ├──────────────┼───────────────────┼─────────────────────────┤
//! │ QueryOption  │ Apicalypse (body) │ WireRequest             │
//! │ Compiler     │ Query string      │ classify status / body  │
//! │ Tier limits  │                   │ Response / NoResults    │
//! └──────────────┴───────────────────┴────────────┬────────────┘
//!                                                 │
//!                            ┌────────────────────┴───────────┐
//!                            │ Transport: HttpClient          │
//!                            │ retry, backoff, rate limit     │
//!                            └────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod encode;
pub mod error;
pub mod http;
pub mod options;
pub mod pagination;
pub mod resource;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{Client, ENDPOINTS};
pub use config::ClientConfig;
pub use dispatch::{Dispatcher, Response};
pub use error::{Error, Result, ResultExt};
pub use options::{
    compose, ids_to_values, CompiledQuery, Compiler, Direction, Operator, QueryOption,
};
pub use pagination::{Page, PageStatus, Pagination};
pub use resource::Resource;
pub use transport::{RawResponse, Transport, WireRequest};
pub use types::{Endpoint, Id, Tier, WireFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
