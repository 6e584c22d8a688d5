/*
[INPUT]:  HTTP configuration (base URLs, timeouts, proxy, credentials)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::{Client, Url};
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::executor::{RateBudget, RetryConfig};
use super::{MexcError, Result};
use crate::auth::{Credentials, RequestSigner};

/// Base URLs for the venue's futures API.
const MAINNET_BASE_URL: &str = "https://contract.mexc.com";
const TESTNET_BASE_URL: &str = "https://contract.testnet.mexc.com";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Selects the test network host. Changes only the base URL, never the
    /// signing algorithm.
    pub is_testnet: bool,
    /// Outbound proxy applied to every request in this session.
    pub proxy_url: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            is_testnet: false,
            proxy_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
        }
    }
}

/// Main HTTP client for the futures API.
///
/// Owns the connection pool and the credentials. Safe to share across
/// concurrent in-flight requests; the pool multiplexes, it never serializes.
/// Connections are released when the client is dropped.
#[derive(Debug)]
pub struct MexcClient {
    pub(crate) http_client: Client,
    pub(crate) base_url: Url,
    pub(crate) signer: RequestSigner,
    pub(crate) retry: RetryConfig,
    pub(crate) budget: Mutex<RateBudget>,
}

impl MexcClient {
    /// Create a new client with default configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let base_url = if config.is_testnet {
            TESTNET_BASE_URL
        } else {
            MAINNET_BASE_URL
        };
        Self::with_config_and_base_url(credentials, config, base_url)
    }

    /// Create a client against an explicit base URL. Used by tests to point
    /// at a mock venue.
    pub fn with_config_and_base_url(
        credentials: Credentials,
        config: ClientConfig,
        base_url: &str,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| MexcError::Config(format!("invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: Url::parse(base_url)?,
            signer: RequestSigner::new(credentials),
            retry: config.retry,
            budget: Mutex::new(RateBudget::default()),
        })
    }

    /// Build a full URL for an endpoint path.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// A fresh external order id. Supplying one makes creates and cancels
    /// idempotent, so they survive retries without double-submitting.
    pub fn generate_external_id() -> String {
        Uuid::new_v4().to_string()
    }
}
