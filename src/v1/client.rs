use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::credentials::Credentials;
use crate::error::ApiError;
use crate::parameters::{OAuthParameterSet, Payload};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::util;
use crate::v1::signer;
use crate::v1::values::*;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Body of a call that finished with HTTP status below 400.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw response body, undecoded.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// OAuth 1.0a user-context client for the v2 REST API.
///
/// Every call is signed independently with a fresh nonce and timestamp and
/// performs exactly one round trip through the injected [`Transport`]. No
/// retries are attempted.
#[derive(Debug, Clone)]
pub struct OAuthV1Client<T> {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    transport: T,
}

impl<T: Transport> OAuthV1Client<T> {
    pub fn new(credentials: Credentials, transport: T) -> Self {
        OAuthV1Client {
            credentials,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transport,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute one signed request against `base_url + endpoint`.
    ///
    /// GET payloads are appended as the query string and signed; POST
    /// payloads are sent as a JSON body and left out of the signature.
    pub fn request(
        &self,
        endpoint: &str,
        payload: Option<&Payload>,
        method: Method,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.prepare(
            endpoint,
            payload,
            method,
            &signer::generate_nonce(),
            Utc::now().timestamp(),
        )?;
        let response = self.transport.send(&request)?;
        classify(response)
    }

    /// Create a post with the given text.
    pub fn post(&self, text: &str) -> Result<ApiResponse, ApiError> {
        let payload = Payload::new().with("text", text);
        self.request(ENDPOINT_TWEETS, Some(&payload), Method::Post)
    }

    /// Connectivity check: fetch the authenticated account without posting.
    pub fn verify_credentials(&self) -> Result<ApiResponse, ApiError> {
        self.request(ENDPOINT_USERS_ME, None, Method::Get)
    }

    /// Build the signed request without sending it.
    ///
    /// `nonce` and `timestamp` are taken as given, which makes the output
    /// fully deterministic.
    pub fn prepare(
        &self,
        endpoint: &str,
        payload: Option<&Payload>,
        method: Method,
        nonce: &str,
        timestamp: i64,
    ) -> Result<HttpRequest, ApiError> {
        if !self.credentials.is_complete() {
            return Err(ApiError::MissingCredentials);
        }

        let url = util::join_endpoint(&self.base_url, endpoint);
        let mut oauth_params = self.protocol_parameters(nonce, timestamp);

        // only GET payloads take part in the signature
        let query = payload.filter(|p| method == Method::Get && !p.is_empty());
        let signature = match query {
            Some(payload) => {
                let mut all_params = oauth_params.clone();
                all_params.merge_payload(payload);
                self.sign(method, &url, &all_params)
            }
            None => self.sign(method, &url, &oauth_params),
        };
        oauth_params.insert(OAUTH_PARAM_KEY_SIGNATURE, signature);

        let headers = vec![
            (
                "Authorization".to_string(),
                signer::build_auth_header(&oauth_params),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];

        let (url, body) = match method {
            Method::Post => {
                let body = payload.map_or_else(|| Value::Object(Default::default()), Value::from);
                (url, Some(body.to_string()))
            }
            Method::Get => match query {
                Some(payload) => (format!("{}?{}", url, util::build_query_string(payload)), None),
                None => (url, None),
            },
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
            timeout: self.timeout,
        })
    }

    fn protocol_parameters(&self, nonce: &str, timestamp: i64) -> OAuthParameterSet {
        let mut params = OAuthParameterSet::new();
        params
            .insert(OAUTH_PARAM_KEY_CONSUMER_KEY, self.credentials.consumer_key.as_str())
            .insert(OAUTH_PARAM_KEY_NONCE, nonce)
            .insert(OAUTH_PARAM_KEY_SIGNATURE_METHOD, OAUTH_VALUE_SIGMETHOD_HMACSHA1)
            .insert(OAUTH_PARAM_KEY_TIMESTAMP, timestamp.to_string())
            .insert(OAUTH_PARAM_KEY_TOKEN, self.credentials.access_token.as_str())
            .insert(OAUTH_PARAM_KEY_VERSION, OAUTH_VALUE_VERSION);
        params
    }

    fn sign(&self, method: Method, url: &str, params: &OAuthParameterSet) -> String {
        signer::sign(
            method.as_str(),
            url,
            params,
            &self.credentials.consumer_secret,
            &self.credentials.access_token_secret,
        )
    }
}

/// Map an HTTP response to the call outcome.
fn classify(response: HttpResponse) -> Result<ApiResponse, ApiError> {
    if response.status >= 400 {
        return Err(ApiError::Api {
            status: response.status,
            message: error_message(&response.body),
        });
    }
    Ok(ApiResponse {
        status: response.status,
        body: response.body,
    })
}

/// Human-readable message of an error body.
///
/// `errors[0].message` wins over `detail`; anything unparseable yields
/// "Unknown error".
pub fn error_message(body: &str) -> String {
    let data = match serde_json::from_str::<Value>(body) {
        Ok(data) => data,
        Err(_) => return UNKNOWN_ERROR.to_string(),
    };
    let detail = data.get("detail").and_then(Value::as_str);
    let first_error = data
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str);
    first_error
        .or(detail)
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}
