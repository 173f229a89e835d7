pub const OAUTH_VALUE_VERSION: &str = "1.0";
pub const OAUTH_VALUE_SIGMETHOD_HMACSHA1: &str = "HMAC-SHA1";

pub const OAUTH_HEADER_SCHEME: &str = "OAuth";

pub const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
pub const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_PARAM_KEY_TOKEN: &str = "oauth_token";
pub const OAUTH_PARAM_KEY_VERSION: &str = "oauth_version";

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/2/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENDPOINT_TWEETS: &str = "tweets";
pub const ENDPOINT_USERS_ME: &str = "users/me";
