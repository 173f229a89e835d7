#![allow(dead_code)]

use std::sync::Mutex;

use oauthpost::error::TransportError;
use oauthpost::{Credentials, HttpRequest, HttpResponse, OAuthV1Client, Transport};
use percent_encoding::percent_decode_str;

/// Records every request and answers with a canned outcome.
pub struct SpyTransport {
    outcome: Result<HttpResponse, TransportError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl SpyTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        SpyTransport {
            outcome: Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        SpyTransport {
            outcome: Err(TransportError(message.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for SpyTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

pub const BASE_URL: &str = "https://api.example.com/2/";

pub fn credentials() -> Credentials {
    Credentials::new("ck", "cs", "tok", "ts")
}

pub fn client(transport: &SpyTransport) -> OAuthV1Client<&SpyTransport> {
    OAuthV1Client::new(credentials(), transport).base_url(BASE_URL)
}

/// Decode an `OAuth k="v", ...` header into its pairs, in order.
pub fn parse_auth_header(header: &str) -> Vec<(String, String)> {
    header
        .strip_prefix("OAuth ")
        .expect("OAuth scheme")
        .split(", ")
        .map(|pair| {
            let (k, v) = pair.split_once('=').expect("key=value");
            let v = v.trim_matches('"');
            (
                percent_decode_str(k).decode_utf8().unwrap().into_owned(),
                percent_decode_str(v).decode_utf8().unwrap().into_owned(),
            )
        })
        .collect()
}

pub fn header_param(header: &str, key: &str) -> String {
    parse_auth_header(header)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
        .unwrap_or_else(|| panic!("{} missing from header", key))
}
