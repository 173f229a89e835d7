//! HTTP transport capability injected into the API client.
//!
//! The client only ever builds an [`HttpRequest`] and hands it to a
//! [`Transport`]; connection pooling and socket handling live behind the
//! trait. With the default `reqwest` feature, [`ReqwestTransport`] provides a
//! blocking implementation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::TransportError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            _ => Err(format!("Unsupported HTTP method: '{}'. Valid options: GET, POST", s)),
        }
    }
}

/// A fully prepared request: signed headers, final URL, encoded body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes exactly one HTTP round trip per call.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use reqwest::blocking::Client;

    use super::{HttpRequest, HttpResponse, Method, Transport};
    use crate::error::TransportError;

    /// Blocking transport backed by a pooled `reqwest` client.
    #[derive(Clone, Debug)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Result<Self, TransportError> {
            let client = Client::builder()
                .user_agent(format!("oauthpost/{}", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| TransportError(e.to_string()))?;
            Ok(ReqwestTransport { client })
        }

        pub fn with_client(client: Client) -> Self {
            ReqwestTransport { client }
        }
    }

    impl Transport for ReqwestTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }

            let response = builder
                .timeout(request.timeout)
                .send()
                .map_err(|e| TransportError(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response.text().map_err(|e| TransportError(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
    }
}
