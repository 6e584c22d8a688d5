/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public MEXC futures client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod order;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    Credentials,
    RequestSigner,
};

// Re-export commonly used types from http
pub use http::{
    BusinessReason,
    ClientConfig,
    MexcClient,
    MexcError,
    Result,
    RetryConfig,
};

// Re-export the order lifecycle and validation surface
pub use order::{
    LeverageBounds,
    NormalizedOrder,
    OrderState,
    ValidationError,
    validate_order,
    validate_trigger_order,
};

// Re-export all types
pub use types::*;
