/*
[INPUT]:  Submodule implementations (client, executor, endpoints, errors)
[OUTPUT]: Public HTTP API surface for the crate
[POS]:    HTTP layer - module organization and re-exports
[UPDATE]: When adding endpoint modules or changing public surface
*/

pub mod client;
pub mod error;
pub mod executor;
pub mod public;
pub mod trade;
pub mod user;

pub use client::{ClientConfig, MexcClient};
pub use error::{BusinessReason, MexcError, Result};
pub use executor::RetryConfig;
