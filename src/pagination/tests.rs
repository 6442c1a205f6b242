//! Tests for pagination module

use super::*;
use crate::dispatch::Dispatcher;
use crate::encode::ApicalypseEncoder;
use crate::error::Error;
use crate::options::{Direction, Operator, QueryOption};
use crate::transport::mock::ScriptedTransport;
use crate::transport::RawResponse;
use crate::types::{Endpoint, Tier};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: i64,
}

fn dispatcher(transport: &Arc<ScriptedTransport>) -> Dispatcher {
    Dispatcher::new(transport.clone(), Arc::new(ApicalypseEncoder), Tier::Standard)
}

fn paginate(transport: &Arc<ScriptedTransport>, endpoint: &str, limit: i64) -> Pagination {
    Pagination::new(dispatcher(transport), Endpoint::new(endpoint), limit, Vec::new()).unwrap()
}

fn bodies(transport: &ScriptedTransport) -> Vec<String> {
    transport
        .requests()
        .into_iter()
        .map(|r| r.body.unwrap_or_default())
        .collect()
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_new() {
    let state = PaginationState::new(
        Endpoint::new("games"),
        10,
        vec![
            QueryOption::fields(["name"]),
            QueryOption::limit(99),
            QueryOption::offset(7),
        ],
    );

    assert_eq!(state.offset, 0);
    assert_eq!(state.limit, 10);
    assert_eq!(state.options, vec![QueryOption::fields(["name"])]);
    assert_eq!(state.status, PageStatus::Fresh);
    assert_eq!(state.total_read, 0);
    assert_eq!(state.pages_read, 0);
}

#[test]
fn test_pagination_state_record_page() {
    let mut state = PaginationState::new(Endpoint::new("games"), 5, Vec::new());

    assert!(state.record_page(5));
    assert_eq!(state.status, PageStatus::Paging);
    assert_eq!(state.offset, 5);

    assert!(!state.record_page(2));
    assert_eq!(state.status, PageStatus::Exhausted);
    assert_eq!(state.offset, 7);
    assert_eq!(state.items_read_last_page, 2);
    assert_eq!(state.total_read, 7);
    assert_eq!(state.pages_read, 2);
}

#[test]
fn test_page_status_terminal() {
    assert!(!PageStatus::Fresh.is_terminal());
    assert!(!PageStatus::Paging.is_terminal());
    assert!(PageStatus::Exhausted.is_terminal());
    assert!(PageStatus::Failed {
        reason: "boom".into()
    }
    .is_terminal());
}

#[test]
fn test_page_empty() {
    let page: Page<Item> = Page::empty();
    assert!(page.is_empty());
    assert_eq!(page.len(), 0);
    assert!(!page.more_items);
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_new_rejects_invalid_limit() {
    let transport = Arc::new(ScriptedTransport::new());

    for limit in [0, -1, 51] {
        let err = Pagination::new(
            dispatcher(&transport),
            Endpoint::new("games"),
            limit,
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::OutOfRange { option: "limit", .. }));
    }
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_new_rejects_invalid_options() {
    let transport = Arc::new(ScriptedTransport::new());
    let err = Pagination::new(
        dispatcher(&transport),
        Endpoint::new("games"),
        10,
        vec![QueryOption::search("   ")],
    )
    .unwrap_err();

    assert!(matches!(err, Error::EmptyQuery));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_new_ignores_caller_paging_options() {
    // A bad caller offset is stripped, not validated
    let transport = Arc::new(ScriptedTransport::new());
    let pagination = Pagination::new(
        dispatcher(&transport),
        Endpoint::new("games"),
        10,
        vec![QueryOption::offset(-5), QueryOption::limit(9999)],
    )
    .unwrap();

    assert_eq!(pagination.limit(), 10);
    assert_eq!(pagination.offset(), 0);
    assert!(pagination.state().options.is_empty());
}

#[test]
fn test_pro_tier_allows_large_pages() {
    let transport = Arc::new(ScriptedTransport::new());
    let dispatcher = Dispatcher::new(transport, Arc::new(ApicalypseEncoder), Tier::Pro);

    let pagination =
        Pagination::new(dispatcher, Endpoint::new("games"), 500, Vec::new()).unwrap();
    assert_eq!(pagination.limit(), 500);
}

// ============================================================================
// Fetch Tests
// ============================================================================

#[tokio::test]
async fn test_walks_until_short_page() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_items("games", 5);
    transport.push_items("games", 5);
    transport.push_items("games", 3);
    let mut pagination = paginate(&transport, "games", 5);

    let mut offsets = vec![pagination.offset()];
    let mut more = Vec::new();
    for _ in 0..3 {
        let page = pagination.fetch_page::<Item>().await.unwrap();
        more.push(page.more_items);
        offsets.push(pagination.offset());
    }

    assert_eq!(more, vec![true, true, false]);
    assert_eq!(offsets, vec![0, 5, 10, 13]);
    assert_eq!(pagination.total_read(), 13);
    assert_eq!(pagination.pages_read(), 3);
    assert!(pagination.is_exhausted());
    assert_eq!(
        bodies(&transport),
        vec![
            "limit 5; offset 0;",
            "limit 5; offset 5;",
            "limit 5; offset 10;",
        ]
    );
}

#[tokio::test]
async fn test_full_last_page_needs_one_more_fetch() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_items("games", 2);
    transport.push("games", Ok(RawResponse::new(200, "[]")));
    let mut pagination = paginate(&transport, "games", 2);

    assert!(pagination.fetch_page::<Item>().await.unwrap().more_items);
    assert_eq!(pagination.status(), &PageStatus::Paging);

    let page = pagination.fetch_page::<Item>().await.unwrap();
    assert!(page.is_empty());
    assert!(!page.more_items);
    assert!(pagination.is_exhausted());
    assert_eq!(pagination.offset(), 2);
}

#[tokio::test]
async fn test_first_page_no_results_is_not_an_error() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push("games", Ok(RawResponse::new(200, "[]")));
    let mut pagination = paginate(&transport, "games", 10);

    let page = pagination.fetch_page::<Item>().await.unwrap();

    assert!(page.is_empty());
    assert!(!page.more_items);
    assert!(pagination.is_exhausted());
    assert_eq!(pagination.offset(), 0);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_exhausted_is_a_noop() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_items("games", 1);
    let mut pagination = paginate(&transport, "games", 10);

    assert!(!pagination.fetch_page::<Item>().await.unwrap().more_items);
    assert_eq!(transport.request_count(), 1);

    for _ in 0..3 {
        let page = pagination.fetch_page::<Item>().await.unwrap();
        assert!(page.is_empty());
        assert!(!page.more_items);
    }
    assert_eq!(transport.request_count(), 1);
    assert_eq!(pagination.offset(), 1);
}

#[tokio::test]
async fn test_continuation_error_fails_pagination() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_items("games", 5);
    transport.push(
        "games",
        Ok(RawResponse::new(500, "Internal Server Error")),
    );
    let mut pagination = paginate(&transport, "games", 5);

    assert!(pagination.fetch_page::<Item>().await.unwrap().more_items);

    let err = pagination.fetch_page::<Item>().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert!(matches!(pagination.status(), PageStatus::Failed { .. }));
    assert_eq!(pagination.offset(), 5);

    let err = pagination.fetch_page::<Item>().await.unwrap_err();
    match err {
        Error::PaginationFailed { endpoint, reason } => {
            assert_eq!(endpoint, "games");
            assert!(reason.contains("500"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_transport_error_fails_pagination() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push("games", Err(Error::Timeout { timeout_ms: 50 }));
    let mut pagination = paginate(&transport, "games", 5);

    let err = pagination.fetch_page::<Item>().await.unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }));
    assert!(!pagination.is_exhausted());
    assert!(pagination.status().is_terminal());
}

#[tokio::test]
async fn test_decode_error_fails_pagination() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push("games", Ok(RawResponse::new(200, r#"[{"id":"x"}]"#)));
    let mut pagination = paginate(&transport, "games", 5);

    let err = pagination.fetch_page::<Item>().await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse { .. }));
    assert!(matches!(pagination.status(), PageStatus::Failed { .. }));
}

#[tokio::test]
async fn test_caller_options_are_sent_without_their_paging() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_items("games", 1);
    let mut pagination = Pagination::new(
        dispatcher(&transport),
        Endpoint::new("games"),
        5,
        vec![
            QueryOption::fields(["name"]),
            QueryOption::limit(10),
            QueryOption::offset(7),
            QueryOption::filter("rating", Operator::GreaterThan, "80"),
            QueryOption::order("rating", Direction::Descending),
        ],
    )
    .unwrap();

    pagination.fetch_page::<Item>().await.unwrap();

    assert_eq!(
        bodies(&transport),
        vec!["fields name; where rating > 80; sort rating desc; limit 5; offset 0;"]
    );
}

#[tokio::test]
async fn test_fetch_page_into_appends() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_items("games", 3);
    transport.push_items("games", 1);
    let mut pagination = paginate(&transport, "games", 3);

    let mut items: Vec<Item> = vec![Item { id: -1 }];
    while pagination.fetch_page_into(&mut items).await.unwrap() {}

    assert_eq!(items.len(), 5);
    assert_eq!(items[0], Item { id: -1 });
    assert_eq!(pagination.total_read(), 4);
}

#[tokio::test]
async fn test_into_stream_yields_pages() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_items("games", 2);
    transport.push_items("games", 2);
    transport.push_items("games", 1);
    let pagination = paginate(&transport, "games", 2);

    let pages: Vec<Vec<Item>> = pagination.into_stream().try_collect().await.unwrap();

    assert_eq!(pages.iter().map(Vec::len).collect::<Vec<_>>(), vec![2, 2, 1]);
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn test_into_stream_stops_on_error() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_items("games", 2);
    transport.push("games", Ok(RawResponse::new(503, "")));
    let pagination = paginate(&transport, "games", 2);

    let result: crate::Result<Vec<Vec<Item>>> = pagination.into_stream().try_collect().await;

    assert!(matches!(result, Err(Error::HttpStatus { status: 503, .. })));
    assert_eq!(transport.request_count(), 2);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[tokio::test]
async fn test_independent_paginations_keep_their_own_offsets() {
    let transport = Arc::new(ScriptedTransport::new());
    for _ in 0..3 {
        transport.push_items("games", 4);
        transport.push_items("platforms", 2);
    }
    transport.push_items("games", 1);
    transport.push_items("platforms", 0);

    let drive = |mut pagination: Pagination| async move {
        let mut offsets = Vec::new();
        loop {
            let page = pagination.fetch_page::<Item>().await.unwrap();
            offsets.push(pagination.offset());
            if !page.more_items {
                return offsets;
            }
        }
    };

    let games = tokio::spawn(drive(paginate(&transport, "games", 4)));
    let platforms = tokio::spawn(drive(paginate(&transport, "platforms", 2)));
    let (games, platforms) = (games.await.unwrap(), platforms.await.unwrap());

    assert_eq!(games, vec![4, 8, 12, 13]);
    assert_eq!(platforms, vec![2, 4, 6, 6]);

    for request in transport.requests() {
        let body = request.body.unwrap_or_default();
        match request.endpoint.as_str() {
            "games" => assert!(body.starts_with("limit 4;")),
            "platforms" => assert!(body.starts_with("limit 2;")),
            other => panic!("unexpected endpoint {other}"),
        }
    }
}
