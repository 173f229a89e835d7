//! OAuth 1.0a user-context credentials.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Consumer key/secret plus access token/secret for a single account.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// `true` when all four fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !(self.consumer_key.is_empty()
            || self.consumer_secret.is_empty()
            || self.access_token.is_empty()
            || self.access_token_secret.is_empty())
    }
}

// secrets never reach logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("access_token", &self.access_token)
            .field("access_token_secret", &redact(&self.access_token_secret))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}
