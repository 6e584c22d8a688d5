/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for mexc-futures-client tests

use std::time::Duration;

use mexc_futures_client::{ClientConfig, Credentials, MexcClient, RetryConfig};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new("test-key", "test-secret")
}

/// A client pointed at the mock server with fast, jitter-free retries so
/// retry-path tests finish in milliseconds.
pub fn test_client(server: &MockServer) -> MexcClient {
    let config = ClientConfig {
        timeout: Duration::from_secs(2),
        retry: RetryConfig {
            max_retries: 2,
            initial_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
            backoff_factor: 2.0,
            jitter: false,
        },
        ..ClientConfig::default()
    };
    MexcClient::with_config_and_base_url(test_credentials(), config, &server.uri())
        .expect("client builds")
}
