//! Typed views of v2 API response bodies.

use serde::Deserialize;

/// `{"data": ...}` envelope used by every v2 endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    pub data: T,
}

/// `data` of `POST tweets`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CreatedPost {
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// `data` of `GET users/me`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Account {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}
