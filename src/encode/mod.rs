//! Query encoder module
//!
//! Supports: Apicalypse (request body), legacy query string (URL params)
//!
//! # Overview
//!
//! The wire grammar belongs to the server, not to the compiler. Each
//! grammar is a `QueryEncoder` strategy; the dispatcher only asks it for
//! the encoded string and where to put it.

mod apicalypse;
mod query_string;
mod types;

pub use apicalypse::ApicalypseEncoder;
pub use query_string::QueryStringEncoder;
pub use types::{encoder_for, Placement, QueryEncoder};
