//! Offset pagination over a dispatcher

use super::types::{Page, PageStatus, PaginationState};
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::options::QueryOption;
use crate::types::Endpoint;
use futures::Stream;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Stateful offset pagination over one endpoint.
///
/// Each `fetch_page` call is one round trip. The offset advances by the
/// number of items decoded, and a short page ends the pagination.
#[derive(Debug, Clone)]
pub struct Pagination {
    dispatcher: Dispatcher,
    state: PaginationState,
}

impl Pagination {
    /// Create a pagination. The limit and options are validated up front
    /// by compiling them once; nothing is sent.
    pub fn new(
        dispatcher: Dispatcher,
        endpoint: Endpoint,
        limit: i64,
        options: Vec<QueryOption>,
    ) -> Result<Self> {
        let compiled = dispatcher.compile(
            options
                .iter()
                .filter(|o| !o.is_paging())
                .chain([&QueryOption::limit(limit), &QueryOption::offset(0)]),
        )?;
        let limit = compiled
            .limit
            .ok_or_else(|| Error::invalid_option("limit", "missing page size"))?;

        Ok(Self {
            dispatcher,
            state: PaginationState::new(endpoint, limit, options),
        })
    }

    /// Fetch the next page.
    ///
    /// `NoResults` ends the pagination without an error. Any other error
    /// is returned and leaves the pagination `Failed`.
    pub async fn fetch_page<T: DeserializeOwned>(&mut self) -> Result<Page<T>> {
        match &self.state.status {
            PageStatus::Exhausted => return Ok(Page::empty()),
            PageStatus::Failed { reason } => {
                return Err(Error::PaginationFailed {
                    endpoint: self.state.endpoint.to_string(),
                    reason: reason.clone(),
                })
            }
            PageStatus::Fresh | PageStatus::Paging => {}
        }

        let query = self
            .dispatcher
            .compile(self.state.options.iter().chain([
                &QueryOption::limit(i64::from(self.state.limit)),
                &QueryOption::offset(i64::from(self.state.offset)),
            ]))
            .map_err(|e| self.fail(e))?;

        debug!(
            endpoint = %self.state.endpoint,
            offset = self.state.offset,
            limit = self.state.limit,
            "fetching page"
        );

        let fetched = self.dispatcher.fetch(&self.state.endpoint, &query).await;
        let items = match fetched {
            Ok(response) => response.items::<T>().map_err(|e| self.fail(e))?,
            Err(Error::NoResults) => {
                self.state.mark_exhausted();
                self.log_exhausted();
                return Ok(Page::empty());
            }
            Err(e) => return Err(self.fail(e)),
        };

        let more_items = self.state.record_page(items.len());
        if !more_items {
            self.log_exhausted();
        }

        Ok(Page { items, more_items })
    }

    /// Fetch the next page, appending its items to `target`. Returns
    /// whether more items may follow.
    pub async fn fetch_page_into<T: DeserializeOwned>(
        &mut self,
        target: &mut Vec<T>,
    ) -> Result<bool> {
        let page = self.fetch_page::<T>().await?;
        target.extend(page.items);
        Ok(page.more_items)
    }

    /// Turn the pagination into a stream of non-empty pages. The stream
    /// ends after the last page or the first error.
    pub fn into_stream<T>(self) -> impl Stream<Item = Result<Vec<T>>> + Send
    where
        T: DeserializeOwned + Send + 'static,
    {
        futures::stream::try_unfold(self, |mut pagination| async move {
            if pagination.is_exhausted() {
                return Ok(None);
            }
            let page = pagination.fetch_page::<T>().await?;
            if page.is_empty() {
                return Ok(None);
            }
            Ok(Some((page.items, pagination)))
        })
    }

    /// Current state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Endpoint being paged
    pub fn endpoint(&self) -> &Endpoint {
        &self.state.endpoint
    }

    /// Offset of the next page
    pub fn offset(&self) -> u32 {
        self.state.offset
    }

    /// Page size
    pub fn limit(&self) -> u32 {
        self.state.limit
    }

    /// Lifecycle state
    pub fn status(&self) -> &PageStatus {
        &self.state.status
    }

    /// Items read across all pages
    pub fn total_read(&self) -> u64 {
        self.state.total_read
    }

    /// Pages read so far
    pub fn pages_read(&self) -> u64 {
        self.state.pages_read
    }

    /// True once a short or empty page has been seen
    pub fn is_exhausted(&self) -> bool {
        self.state.status == PageStatus::Exhausted
    }

    fn fail(&mut self, err: Error) -> Error {
        warn!(
            endpoint = %self.state.endpoint,
            offset = self.state.offset,
            error = %err,
            "pagination failed"
        );
        self.state.mark_failed(err.to_string());
        err
    }

    fn log_exhausted(&self) {
        info!(
            endpoint = %self.state.endpoint,
            pages = self.state.pages_read,
            items = self.state.total_read,
            "pagination complete"
        );
    }
}
