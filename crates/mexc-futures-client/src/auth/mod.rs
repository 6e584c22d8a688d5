/*
[INPUT]:  API key/secret pairs and request parameters
[OUTPUT]: Credentials and per-request HMAC signatures
[POS]:    Auth layer - credential storage and request signing
[UPDATE]: When signing scheme or credential format changes
*/

pub mod credentials;
pub mod signer;

pub use credentials::Credentials;
pub use signer::RequestSigner;
