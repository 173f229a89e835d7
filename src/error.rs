//! Error types.

use thiserror::Error;

/// Coarse classification of an [`ApiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A credential field was empty; no request was sent.
    MissingCredentials,
    /// Connection, DNS or timeout failure.
    Transport,
    /// The platform answered with HTTP status >= 400.
    ApiError,
}

/// Failure outcome of a single API call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("OAuth 1.0a credentials are not configured")]
    MissingCredentials,

    #[error("{0}")]
    Transport(String),

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingCredentials => ErrorKind::MissingCredentials,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Api { .. } => ErrorKind::ApiError,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Transport(e.0)
    }
}

/// The HTTP round trip itself failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Unexpected response body: {0}")]
    Response(#[from] serde_json::Error),

    #[error("Credentials were not accepted: response carried no username")]
    Unverified,
}

impl PublishError {
    /// Process exit code for the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            PublishError::Api(ApiError::MissingCredentials) => 2,
            _ => 1,
        }
    }
}
