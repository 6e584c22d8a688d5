/*
[INPUT]:  API key and signing secret strings
[OUTPUT]: Immutable credential pair with redacted debug output
[POS]:    Auth layer - credential storage
[UPDATE]: When credential fields change
*/

use std::fmt;

/// API credentials for authenticated requests.
///
/// Immutable for the lifetime of a client instance. The secret is never
/// printed; `Debug` redacts it.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Read credentials from environment variables, if both are set.
    pub fn from_env(api_key_env: &str, api_secret_env: &str) -> Option<Self> {
        let api_key = std::env::var(api_key_env).ok()?;
        let api_secret = std::env::var(api_secret_env).ok()?;
        Some(Self::new(api_key, api_secret))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
