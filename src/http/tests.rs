//! Tests for the HTTP transport module

use super::*;
use crate::transport::{RawResponse, Transport, WireRequest};
use crate::types::{BackoffType, Endpoint, Method};
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

async fn get(client: &HttpClient, endpoint: &str) -> RawResponse {
    let request = WireRequest::new(Method::GET, Endpoint::new(endpoint));
    client.execute(request).await.unwrap()
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.base_url.is_none());
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::default()));
    assert!(config.user_agent.starts_with("igdb-query/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.igdb.com/v4")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("user-key", "secret")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.igdb.com/v4".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(
        config.default_headers.get("user-key"),
        Some(&"secret".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .raw_query("limit=5")
        .header("X-Request-Id", "abc123")
        .body("fields *;", "text/plain")
        .timeout(Duration::from_secs(10))
        .retries(2);

    assert_eq!(config.raw_query.as_deref(), Some("limit=5"));
    assert_eq!(
        config.body,
        Some(("fields *;".to_string(), "text/plain".to_string()))
    );
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_http_client_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(header("user-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("user-key", "secret")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = get(&client, "games").await;
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_http_client_returns_client_errors_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = get(&client, "/missing").await;

    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_http_client_retry_on_500() {
    let mock_server = MockServer::start().await;

    // First two calls return 500, third succeeds
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\":1}]"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = get(&client, "/flaky").await;

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_http_client_rate_limit_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_string("Too Many Requests"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = get(&client, "/limited").await;

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_http_client_returns_last_response_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/always-fail"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Unavailable"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = get(&client, "/always-fail").await;
    assert_eq!(response.status, 503);
}

// ============================================================================
// Transport Tests
// ============================================================================

#[tokio::test]
async fn test_transport_execute_body_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/games"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "text/plain"))
        .and(body_string("fields *;"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Count", "42")
                .set_body_string("[{\"id\":7}]"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut request = WireRequest::new(Method::POST, Endpoint::new("games"));
    request.body = Some("fields *;".to_string());

    let raw = client.execute(request).await.unwrap();

    assert_eq!(raw.status, 200);
    assert_eq!(raw.body, "[{\"id\":7}]");
    assert_eq!(raw.headers.get("x-count"), Some(&"42".to_string()));
}

#[tokio::test]
async fn test_transport_execute_query_string_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("limit", "5"))
        .and(query_param("filter[platforms][eq]", "48"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut request = WireRequest::new(Method::GET, Endpoint::new("games"));
    request.query = Some("filter%5Bplatforms%5D%5Beq%5D=48&limit=5".to_string());

    let raw = client.execute(request).await.unwrap();
    assert_eq!(raw.status, 200);
}

// ============================================================================
// Backoff Tests
// ============================================================================

fn client_with_backoff(backoff: BackoffType, initial: Duration, max: Duration) -> HttpClient {
    let config = HttpClientConfig::builder()
        .backoff(backoff, initial, max)
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_calculate_backoff_constant() {
    let client = client_with_backoff(
        BackoffType::Constant,
        Duration::from_millis(100),
        Duration::from_secs(10),
    );

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(5), Duration::from_millis(100));
}

#[test]
fn test_calculate_backoff_linear() {
    let client = client_with_backoff(
        BackoffType::Linear,
        Duration::from_millis(100),
        Duration::from_secs(10),
    );

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(300));
}

#[test]
fn test_calculate_backoff_exponential_respects_max() {
    let client = client_with_backoff(
        BackoffType::Exponential,
        Duration::from_millis(100),
        Duration::from_millis(500),
    );

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(10), Duration::from_millis(500));
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new().unwrap();
    let debug = format!("{client:?}");
    assert!(debug.contains("HttpClient"));
    assert!(client.has_rate_limiter());
}
