//! Pagination module
//!
//! Offset pagination: each page is requested with `limit N; offset K;`,
//! the offset advances by the number of items read, and a page shorter
//! than the limit ends the walk.
//!
//! # Lifecycle
//!
//! ```text
//! Fresh ──full page──▶ Paging ──short/empty page──▶ Exhausted
//!   │                    │
//!   └──────error─────────┴──────────────────────────▶ Failed
//! ```
//!
//! `Exhausted` and `Failed` are terminal. Fetching from an exhausted
//! pagination returns an empty page; fetching from a failed one returns
//! `PaginationFailed`. Neither sends a request.

mod paginator;
mod types;

pub use paginator::Pagination;
pub use types::{Page, PageStatus, PaginationState};

#[cfg(test)]
mod tests;
