/*
[INPUT]:  Endpoint paths, query/body payloads, and idempotency class
[OUTPUT]: Decoded venue responses with retry, backoff, and throttling applied
[POS]:    HTTP layer - request execution pipeline (sign, send, retry, decode)
[UPDATE]: When retry policy, rate-limit handling, or envelope decoding changes
*/

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::client::MexcClient;
use super::error::CODE_SUCCESS;
use super::{MexcError, Result};
use crate::auth::RequestSigner;
use crate::types::ApiResponse;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add jitter to the delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

/// Retry class of a call. Mutating calls are only retry-safe when the caller
/// supplied an external id the venue can use for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Idempotency {
    ReadOnly,
    MutatingKeyed,
    MutatingUnkeyed,
}

impl Idempotency {
    fn allows_retry(self) -> bool {
        !matches!(self, Idempotency::MutatingUnkeyed)
    }
}

/// Remaining-budget hints from venue rate-limit headers. Dispatch throttles
/// while the budget is exhausted instead of burning attempts on 429s.
#[derive(Debug, Default)]
pub(crate) struct RateBudget {
    remaining: Option<u64>,
    reset_at: Option<Instant>,
}

const EXHAUSTED_BUDGET_BACKOFF: Duration = Duration::from_secs(1);

impl RateBudget {
    pub(crate) fn record_headers(&mut self, headers: &HeaderMap) {
        if let Some(remaining) = header_u64(headers, "x-ratelimit-remaining") {
            self.remaining = Some(remaining);
        }
        if let Some(reset_secs) = header_u64(headers, "x-ratelimit-reset") {
            self.reset_at = Some(Instant::now() + Duration::from_secs(reset_secs));
        }
    }

    /// Mark the budget spent after a reported violation.
    pub(crate) fn exhaust(&mut self, retry_after: Option<Duration>) {
        self.remaining = Some(0);
        self.reset_at = Some(Instant::now() + retry_after.unwrap_or(EXHAUSTED_BUDGET_BACKOFF));
    }

    /// How long dispatch must wait before the next request, if at all.
    pub(crate) fn throttle_delay(&self) -> Option<Duration> {
        if self.remaining != Some(0) {
            return None;
        }
        let reset_at = self.reset_at?;
        reset_at.checked_duration_since(Instant::now())
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

impl MexcClient {
    pub(crate) async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.execute(Method::GET, path, query, None, false, Idempotency::ReadOnly, None)
            .await?
            .ok_or_else(|| missing_data(path))
    }

    pub(crate) async fn get_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.execute(Method::GET, path, query, None, true, Idempotency::ReadOnly, None)
            .await?
            .ok_or_else(|| missing_data(path))
    }

    pub(crate) async fn post_signed<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        idempotency: Idempotency,
        external_id: Option<&str>,
    ) -> Result<T> {
        let body_json = serde_json::to_string(body)?;
        self.execute(
            Method::POST,
            path,
            &[],
            Some(body_json),
            true,
            idempotency,
            external_id,
        )
        .await?
        .ok_or_else(|| missing_data(path))
    }

    /// POST whose success carries no meaningful `data` payload.
    pub(crate) async fn post_signed_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        idempotency: Idempotency,
    ) -> Result<()> {
        let body_json = serde_json::to_string(body)?;
        self.execute::<serde_json::Value>(
            Method::POST,
            path,
            &[],
            Some(body_json),
            true,
            idempotency,
            None,
        )
        .await
        .map(|_| ())
    }

    /// The retry loop. Throttles against the rate budget before every
    /// dispatch, classifies failures, and backs off between attempts.
    #[allow(clippy::too_many_arguments)]
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
        signed: bool,
        idempotency: Idempotency,
        external_id: Option<&str>,
    ) -> Result<Option<T>> {
        let max_retries = if idempotency.allows_retry() {
            self.retry.max_retries
        } else {
            0
        };

        let mut attempt = 0u32;
        loop {
            let throttle = self.budget.lock().await.throttle_delay();
            if let Some(delay) = throttle {
                warn!(
                    delay_ms = delay.as_millis() as u64,
                    path, "rate budget exhausted, throttling dispatch"
                );
                tokio::time::sleep(delay).await;
            }

            let result = self
                .dispatch(method.clone(), path, query, body.as_deref(), signed, external_id)
                .await;

            let error = match result {
                Ok(data) => return Ok(data),
                Err(error) => error,
            };

            if let MexcError::RateLimited { retry_after_ms } = &error {
                // A rate-limited request was never applied, so retrying is
                // safe for every idempotency class.
                self.budget
                    .lock()
                    .await
                    .exhaust(retry_after_ms.map(Duration::from_millis));
                if attempt < self.retry.max_retries {
                    let delay = self.retry.delay_for_attempt(attempt);
                    debug!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        path,
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                return Err(error);
            }

            if !error.is_retryable() {
                return Err(error);
            }

            if !idempotency.allows_retry() {
                // The request may or may not have reached the venue. Without
                // an external id a resubmit could double-fill, so force the
                // caller to reconcile via a query first.
                return Err(MexcError::OutcomeUnknown {
                    message: error.to_string(),
                });
            }

            if attempt < max_retries {
                let delay = self.retry.delay_for_attempt(attempt);
                debug!(
                    attempt = attempt + 1,
                    max = max_retries,
                    delay_ms = delay.as_millis() as u64,
                    path,
                    "retrying request"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(error);
        }
    }

    /// One signed dispatch: stamp the timestamp, sign, send, decode.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&str>,
        signed: bool,
        external_id: Option<&str>,
    ) -> Result<Option<T>> {
        let mut url = self.endpoint_url(path)?;
        if !query.is_empty() {
            let mut sorted = query.to_vec();
            sorted.sort_by_key(|(key, _)| *key);
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &sorted {
                pairs.append_pair(key, value);
            }
            drop(pairs);
        }
        // The signature must cover the query string byte for byte as it goes
        // out, percent-encoding included, so it is read back off the URL.
        let wire_query = url.query().unwrap_or("").to_string();

        let mut request = self.http_client.request(method, url);

        if signed {
            // Timestamp is stamped here, per attempt, to stay inside the
            // venue's skew window.
            let timestamp = RequestSigner::timestamp_millis();
            let param_string = match body {
                Some(json) => json.to_string(),
                None => wire_query,
            };
            let signature = self.signer.sign(timestamp, &param_string);
            request = request
                .header("ApiKey", self.signer.api_key())
                .header("Request-Time", timestamp.to_string())
                .header("Signature", signature);
        }

        if let Some(json) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(json.to_string());
        }

        let response = request.send().await?;
        self.budget.lock().await.record_headers(response.headers());

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = response.text().await.unwrap_or_default();
            return Err(MexcError::Auth { message });
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms =
                header_u64(response.headers(), "retry-after").map(|secs| secs * 1000);
            return Err(MexcError::RateLimited { retry_after_ms });
        }
        if status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(MexcError::Transient {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if envelope.success && envelope.code == CODE_SUCCESS {
            Ok(envelope.data)
        } else {
            Err(MexcError::from_venue_code(
                envelope.code,
                envelope.message.unwrap_or_default(),
                external_id,
            ))
        }
    }
}

fn missing_data(path: &str) -> MexcError {
    MexcError::InvalidResponse(format!("missing data field for {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_grows_exponentially_without_jitter() {
        let config = RetryConfig {
            jitter: false,
            ..RetryConfig::default()
        };
        assert_eq!(config.delay_for_attempt(0).as_millis(), 200);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 400);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 800);
    }

    #[test]
    fn delay_caps_at_max() {
        let config = RetryConfig {
            max_retries: 8,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(2000),
            backoff_factor: 10.0,
            jitter: false,
        };
        assert_eq!(config.delay_for_attempt(5).as_millis(), 2000);
    }

    #[test]
    fn fresh_budget_does_not_throttle() {
        let budget = RateBudget::default();
        assert!(budget.throttle_delay().is_none());
    }

    #[test]
    fn exhausted_budget_throttles_until_reset() {
        let mut budget = RateBudget::default();
        budget.exhaust(Some(Duration::from_secs(2)));
        let delay = budget.throttle_delay().expect("throttle expected");
        assert!(delay <= Duration::from_secs(2));
        assert!(delay > Duration::from_millis(1500));
    }

    #[test]
    fn remaining_budget_does_not_throttle() {
        let mut budget = RateBudget::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", "5".parse().unwrap());
        headers.insert("x-ratelimit-reset", "10".parse().unwrap());
        budget.record_headers(&headers);
        assert!(budget.throttle_delay().is_none());
    }

    #[test]
    fn mutating_unkeyed_never_allows_retry() {
        assert!(Idempotency::ReadOnly.allows_retry());
        assert!(Idempotency::MutatingKeyed.allows_retry());
        assert!(!Idempotency::MutatingUnkeyed.allows_retry());
    }
}
