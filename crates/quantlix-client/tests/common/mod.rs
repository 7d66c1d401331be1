//! Common test utilities for integration tests.

#![allow(dead_code)]

use quantlix_client::{PublicClient, QuantlixClient};
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Start a mock Quantlix API server.
pub async fn mock_quantlix_server() -> MockServer {
    MockServer::start().await
}

/// Create an authenticated client configured for a mock server.
pub fn test_client(mock_server: &MockServer) -> QuantlixClient {
    QuantlixClient::with_timeout(TEST_API_KEY, mock_server.uri(), Duration::from_secs(5)).unwrap()
}

/// Create an unauthenticated client configured for a mock server.
pub fn test_public_client(mock_server: &MockServer) -> PublicClient {
    PublicClient::with_timeout(mock_server.uri(), Duration::from_secs(5)).unwrap()
}

/// Query string of the only request the server received.
pub async fn single_request_query(mock_server: &MockServer) -> Option<String> {
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests[0].url.query().map(str::to_string)
}
