//! TOML configuration.
//!
//! ```toml
//! [credentials]
//! consumer_key = "..."
//! consumer_secret = "..."
//! access_token = "..."
//! access_token_secret = "..."
//!
//! [api]
//! base_url = "https://api.twitter.com/2/"
//! timeout_secs = 30
//!
//! [publish]
//! enabled = true
//! format = "{title}\n\n{url}"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::credentials::Credentials;
use crate::error::ConfigError;
use crate::template::DEFAULT_FORMAT;
use crate::transport::Transport;
use crate::v1::client::OAuthV1Client;
use crate::v1::values::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            enabled: false,
            format: default_format(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Config {
    /// Load configuration from a specific path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.api.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.api.base_url.clone(),
            source,
        })?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Client wired with this configuration's credentials, base URL and timeout.
    pub fn api_client<T: Transport>(&self, transport: T) -> OAuthV1Client<T> {
        OAuthV1Client::new(self.credentials.clone(), transport)
            .base_url(self.api.base_url.clone())
            .timeout(self.timeout())
    }
}
