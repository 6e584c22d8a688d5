/*
[INPUT]:  Request parameters, timestamp, and the API secret
[OUTPUT]: Hex-encoded HMAC-SHA256 signature headers
[POS]:    Auth layer - request signing for private endpoints
[UPDATE]: When changing signing algorithm or parameter canonicalization
*/

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::Credentials;

type HmacSha256 = Hmac<Sha256>;

/// Signs private-endpoint requests.
///
/// The venue expects `hex(HMAC-SHA256(secret, api_key + timestamp + params))`
/// where `params` is the percent-encoded query string exactly as sent on the
/// wire for GET requests and the raw JSON body for POST requests. The
/// timestamp is stamped at dispatch time, not request-construction time, to
/// stay inside the venue's skew window.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Current time in milliseconds, the venue's timestamp unit.
    pub fn timestamp_millis() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Sign a request. Pure function of the inputs and the secret.
    pub fn sign(&self, timestamp_millis: i64, param_string: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.api_secret().as_bytes())
            .expect("HMAC accepts keys of any size");
        mac.update(self.credentials.api_key().as_bytes());
        mac.update(timestamp_millis.to_string().as_bytes());
        mac.update(param_string.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
