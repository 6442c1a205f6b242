//! Typed endpoint access
//!
//! `Resource<T>` binds one endpoint to an item type and offers the common
//! operations over it. Options are passed per call and composed in order;
//! ids and search terms are appended after the caller's options.

use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::options::{ids_to_values, Operator, QueryOption};
use crate::pagination::Pagination;
use crate::types::{Endpoint, Id};
use serde::de::DeserializeOwned;
use std::fmt;
use std::iter;
use std::marker::PhantomData;
use tracing::debug;

/// Typed handle on one endpoint
pub struct Resource<T> {
    dispatcher: Dispatcher,
    endpoint: Endpoint,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            endpoint: self.endpoint.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("endpoint", &self.endpoint)
            .field("item", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Resource<T> {
    /// Bind `endpoint` to item type `T`
    pub fn new(dispatcher: Dispatcher, endpoint: Endpoint) -> Self {
        Self {
            dispatcher,
            endpoint,
            _item: PhantomData,
        }
    }

    /// Endpoint this resource reads from
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Fetch the item with `id`
    pub async fn get(&self, id: Id, options: &[QueryOption]) -> Result<T> {
        if id < 0 {
            return Err(Error::NegativeId { id });
        }

        let by_id = QueryOption::filter("id", Operator::Equals, id.to_string());
        self.fetch(options.iter().chain(iter::once(&by_id)))
            .await?
            .into_iter()
            .next()
            .ok_or(Error::NoResults)
    }

    /// Fetch the items with the given ids, in server order
    pub async fn list(&self, ids: &[Id], options: &[QueryOption]) -> Result<Vec<T>> {
        if ids.is_empty() {
            return Err(Error::EmptyIds);
        }
        if let Some(&id) = ids.iter().find(|&&id| id < 0) {
            return Err(Error::NegativeId { id });
        }

        let by_ids = QueryOption::filter_many("id", Operator::In, ids_to_values(ids));
        self.fetch(options.iter().chain(iter::once(&by_ids))).await
    }

    /// Fetch items matching `options`
    pub async fn index(&self, options: &[QueryOption]) -> Result<Vec<T>> {
        self.fetch(options).await
    }

    /// Full-text search
    pub async fn search(&self, query: &str, options: &[QueryOption]) -> Result<Vec<T>> {
        let search = QueryOption::search(query);
        self.fetch(options.iter().chain(iter::once(&search))).await
    }

    /// Count the items matching `options`
    pub async fn count(&self, options: &[QueryOption]) -> Result<u64> {
        let query = self.dispatcher.compile(options)?;
        self.dispatcher.fetch_count(&self.endpoint, &query).await
    }

    /// Field names available on this endpoint
    pub async fn fields(&self) -> Result<Vec<String>> {
        self.dispatcher.fetch_fields(&self.endpoint).await
    }

    /// Start a pagination over this endpoint with page size `limit`
    pub fn paginate(&self, limit: i64, options: &[QueryOption]) -> Result<Pagination> {
        Pagination::new(
            self.dispatcher.clone(),
            self.endpoint.clone(),
            limit,
            options.to_vec(),
        )
    }

    async fn fetch<'a, I>(&self, options: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = &'a QueryOption>,
    {
        let query = self.dispatcher.compile(options)?;
        debug!(endpoint = %self.endpoint, filters = query.filters.len(), "resource query");
        self.dispatcher.fetch(&self.endpoint, &query).await?.items()
    }
}
