/*
[INPUT]:  Error sources (HTTP transport, venue codes, serialization, auth)
[OUTPUT]: Structured error taxonomy with retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or venue code mappings
*/

use thiserror::Error;

use crate::order::ValidationError;

// Venue error codes. The venue does not document these beyond the response
// envelope; unknown codes fall into the business bucket.
pub(crate) const CODE_SUCCESS: i64 = 0;
pub(crate) const CODE_INTERNAL_ERROR: i64 = 500;
pub(crate) const CODE_RATE_LIMITED: i64 = 510;
pub(crate) const CODE_PARAM_INVALID: i64 = 600;
pub(crate) const CODE_SIGNATURE_INVALID: i64 = 602;
pub(crate) const CODE_API_KEY_INVALID: i64 = 603;
pub(crate) const CODE_INSUFFICIENT_BALANCE: i64 = 2005;
pub(crate) const CODE_LEVERAGE_INVALID: i64 = 2006;
pub(crate) const CODE_ORDER_NOT_EXIST: i64 = 2011;
pub(crate) const CODE_ORDER_FINISHED: i64 = 2013;
pub(crate) const CODE_MARGIN_VIOLATION: i64 = 2019;
pub(crate) const CODE_DUPLICATE_EXTERNAL_ID: i64 = 2026;

/// Why the venue rejected an otherwise well-formed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessReason {
    MarginViolation,
    InsufficientBalance,
    InvalidLeverage,
    InvalidParameter,
    OrderNotFound,
    Other,
}

/// Main error type for the client.
#[derive(Error, Debug)]
pub enum MexcError {
    /// Malformed input caught before any network call. Never retried.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Signature or timestamp rejected by the venue. Fatal for the current
    /// credentials; the caller must re-establish them.
    #[error("authentication rejected: {message}")]
    Auth { message: String },

    /// The venue reported a rate limit violation.
    #[error("rate limited")]
    RateLimited { retry_after_ms: Option<u64> },

    /// Venue-side 5xx or internal error. Retryable for idempotent calls.
    #[error("transient venue error ({status}): {message}")]
    Transient { status: u16, message: String },

    /// A mutating request without an external id timed out or failed in a
    /// way that leaves its effect unknown. Reconcile via a query before
    /// resubmitting.
    #[error("request outcome unknown: {message}")]
    OutcomeUnknown { message: String },

    /// The venue recognized a repeated external id. The original request
    /// already took effect.
    #[error("duplicate request for external id {external_id}")]
    DuplicateRequest { external_id: String },

    /// Business-logic rejection. Never retried; the venue's reason is
    /// preserved.
    #[error("venue rejected request (code {code}): {message}")]
    Business {
        code: i64,
        reason: BusinessReason,
        message: String,
    },

    /// HTTP transport failure (connect, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed.
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response shape did not match the endpoint contract.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MexcError {
    /// Whether retrying could change the outcome. Idempotency is decided
    /// separately by the executor.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MexcError::Http(_) | MexcError::RateLimited { .. } | MexcError::Transient { .. }
        )
    }

    /// Whether the error indicates rejected credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, MexcError::Auth { .. })
    }

    /// Map a venue envelope code into the taxonomy.
    pub(crate) fn from_venue_code(
        code: i64,
        message: String,
        external_id: Option<&str>,
    ) -> Self {
        match code {
            CODE_RATE_LIMITED => MexcError::RateLimited {
                retry_after_ms: None,
            },
            CODE_SIGNATURE_INVALID | CODE_API_KEY_INVALID => MexcError::Auth { message },
            CODE_DUPLICATE_EXTERNAL_ID => MexcError::DuplicateRequest {
                external_id: external_id.unwrap_or_default().to_string(),
            },
            CODE_INTERNAL_ERROR => MexcError::Transient {
                status: 500,
                message,
            },
            CODE_MARGIN_VIOLATION => MexcError::Business {
                code,
                reason: BusinessReason::MarginViolation,
                message,
            },
            CODE_INSUFFICIENT_BALANCE => MexcError::Business {
                code,
                reason: BusinessReason::InsufficientBalance,
                message,
            },
            CODE_LEVERAGE_INVALID => MexcError::Business {
                code,
                reason: BusinessReason::InvalidLeverage,
                message,
            },
            CODE_PARAM_INVALID => MexcError::Business {
                code,
                reason: BusinessReason::InvalidParameter,
                message,
            },
            CODE_ORDER_NOT_EXIST => MexcError::Business {
                code,
                reason: BusinessReason::OrderNotFound,
                message,
            },
            _ => MexcError::Business {
                code,
                reason: BusinessReason::Other,
                message,
            },
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, MexcError>;
