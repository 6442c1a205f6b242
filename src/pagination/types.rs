//! Pagination types
//!
//! State tracked by a `Pagination` between pages, and the page it hands
//! back.

use crate::options::QueryOption;
use crate::types::Endpoint;

/// Lifecycle of a pagination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageStatus {
    /// No page fetched yet
    #[default]
    Fresh,
    /// Last page was full; more may follow
    Paging,
    /// Last page was short or empty. Terminal.
    Exhausted,
    /// A fetch failed. Terminal.
    Failed {
        /// Message of the error that ended the pagination
        reason: String,
    },
}

impl PageStatus {
    /// True for `Exhausted` and `Failed`
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Failed { .. })
    }
}

/// One fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Whether another fetch may return more
    pub more_items: bool,
}

impl<T> Page<T> {
    /// A page with no items and nothing after it
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            more_items: false,
        }
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Tracks pagination progress across fetches
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Endpoint being paged
    pub endpoint: Endpoint,
    /// Page size, fixed at construction
    pub limit: u32,
    /// Offset of the next page
    pub offset: u32,
    /// Caller options with any Limit/Offset removed
    pub options: Vec<QueryOption>,
    /// Items decoded by the most recent fetch
    pub items_read_last_page: usize,
    /// Items decoded so far
    pub total_read: u64,
    /// Fetches that reached the server and were decoded
    pub pages_read: u64,
    /// Current lifecycle state
    pub status: PageStatus,
}

impl PaginationState {
    /// Create a fresh state at offset zero. Limit and Offset options are
    /// dropped; the pagination owns both.
    pub fn new(endpoint: Endpoint, limit: u32, options: Vec<QueryOption>) -> Self {
        Self {
            endpoint,
            limit,
            offset: 0,
            options: options.into_iter().filter(|o| !o.is_paging()).collect(),
            items_read_last_page: 0,
            total_read: 0,
            pages_read: 0,
            status: PageStatus::Fresh,
        }
    }

    /// Record a decoded page of `count` items. Returns whether more items
    /// may follow.
    pub fn record_page(&mut self, count: usize) -> bool {
        self.items_read_last_page = count;
        self.total_read += count as u64;
        self.pages_read += 1;
        self.offset = self.offset.saturating_add(count as u32);

        let more = count > 0 && count as u64 >= u64::from(self.limit);
        self.status = if more {
            PageStatus::Paging
        } else {
            PageStatus::Exhausted
        };
        more
    }

    /// Record a fetch that found nothing
    pub fn mark_exhausted(&mut self) {
        self.items_read_last_page = 0;
        self.status = PageStatus::Exhausted;
    }

    /// Record a failed fetch
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = PageStatus::Failed {
            reason: reason.into(),
        };
    }
}
