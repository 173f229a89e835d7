use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

use crate::parameters::OAuthParameterSet;
use crate::v1::percent_encode;
use crate::v1::values::OAUTH_HEADER_SCHEME;

type HmacSha1 = Hmac<Sha1>;

/// Generate a fresh `oauth_nonce`.
///
/// A random v4 UUID (hex, no dashes) followed by the current sub-second
/// nanoseconds in hex. Alphanumeric only, so it survives any encoding
/// untouched.
pub fn generate_nonce() -> String {
    format!(
        "{}{:x}",
        Uuid::new_v4().simple(),
        Utc::now().timestamp_subsec_nanos()
    )
}

/// Build the signature base string.
///
/// `UPPER(method) & enc(url) & enc(k1=v1&k2=v2...)`, where pairs are sorted
/// ascending by key bytes and each key and value is percent-encoded before
/// joining.
pub fn signature_base_string(http_method: &str, url: &str, params: &OAuthParameterSet) -> String {
    let param_str = params
        .sorted()
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<String>>()
        .join("&");

    // get/post parameters are encoded twice.
    format!(
        "{}&{}&{}",
        http_method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&param_str)
    )
}

/// Compute the HMAC-SHA1 signature of a request.
///
/// # Parameters
/// - http_method: HTTP method, ex)"GET", "POST", ...
/// - url: request URL without query string.
/// - params: every parameter to sign (protocol parameters included), unencoded.
/// - consumer_secret: consumer secret key.
/// - token_secret: access token secret.
/// # Returns
/// Base64 signature (not percent-encoded).
pub fn sign(
    http_method: &str,
    url: &str,
    params: &OAuthParameterSet,
    consumer_secret: &str,
    token_secret: &str,
) -> String {
    let base_str = signature_base_string(http_method, url, params);
    let sign_key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(sign_key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(base_str.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Render an `Authorization` header value from protocol parameters.
///
/// Pairs are emitted in the order they were inserted, as
/// `key="value"` joined by `", "`. Nothing is re-sorted.
pub fn build_auth_header(oauth_params: &OAuthParameterSet) -> String {
    let parts = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<String>>()
        .join(", ");
    format!("{} {}", OAUTH_HEADER_SCHEME, parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::values::*;

    fn protocol_params() -> OAuthParameterSet {
        let mut params = OAuthParameterSet::new();
        params
            .insert(OAUTH_PARAM_KEY_CONSUMER_KEY, "ck")
            .insert(OAUTH_PARAM_KEY_NONCE, "abc123")
            .insert(OAUTH_PARAM_KEY_SIGNATURE_METHOD, OAUTH_VALUE_SIGMETHOD_HMACSHA1)
            .insert(OAUTH_PARAM_KEY_TIMESTAMP, "1700000000")
            .insert(OAUTH_PARAM_KEY_TOKEN, "tok")
            .insert(OAUTH_PARAM_KEY_VERSION, OAUTH_VALUE_VERSION);
        params
    }

    #[test]
    fn test_sign_known_vector() {
        let sign = sign(
            "POST",
            "https://api.example.com/2/tweets",
            &protocol_params(),
            "cs",
            "ts",
        );
        assert_eq!(sign, "Ettko1D3X3o7EKs+cVjvYEwfrB8=");
    }

    #[test]
    fn test_sign_twitter_reference() {
        // https://developer.twitter.com/ja/docs/basics/authentication/guides/creating-a-signature
        let mut params = OAuthParameterSet::new();
        params
            .insert("include_entities", "true")
            .insert(
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            )
            .insert(OAUTH_PARAM_KEY_CONSUMER_KEY, "xvz1evFS4wEEPTGEFPHBog")
            .insert(
                OAUTH_PARAM_KEY_NONCE,
                "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg",
            )
            .insert(OAUTH_PARAM_KEY_SIGNATURE_METHOD, "HMAC-SHA1")
            .insert(OAUTH_PARAM_KEY_TIMESTAMP, "1318622958")
            .insert(
                OAUTH_PARAM_KEY_TOKEN,
                "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            )
            .insert(OAUTH_PARAM_KEY_VERSION, "1.0");
        let sign = sign(
            "post",
            "https://api.twitter.com/1.1/statuses/update.json",
            &params,
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );
        assert_eq!(sign, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let params = protocol_params();
        let first = sign("GET", "https://api.example.com/2/users/me", &params, "cs", "ts");
        let second = sign("GET", "https://api.example.com/2/users/me", &params, "cs", "ts");
        assert_eq!(first, second);
        assert_eq!(first, "8JWPTW/tp2evflumZ70kCLd8teE=");
    }

    #[test]
    fn test_sign_ignores_insertion_order() {
        let forward = protocol_params();
        let reversed = forward
            .iter()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<OAuthParameterSet>();
        assert_ne!(
            forward.iter().next(),
            reversed.iter().next(),
            "precondition: orders differ"
        );
        assert_eq!(
            sign("POST", "https://api.example.com/2/tweets", &forward, "cs", "ts"),
            sign("POST", "https://api.example.com/2/tweets", &reversed, "cs", "ts"),
        );
    }

    #[test]
    fn test_signature_base_string_encodes_twice() {
        let mut params = protocol_params();
        params.insert("q", "hello world");
        let base = signature_base_string(
            "get",
            "https://api.example.com/2/tweets/search/recent",
            &params,
        );
        assert_eq!(
            base,
            "GET&https%3A%2F%2Fapi.example.com%2F2%2Ftweets%2Fsearch%2Frecent&\
             oauth_consumer_key%3Dck%26oauth_nonce%3Dabc123%26oauth_signature_method%3DHMAC-SHA1\
             %26oauth_timestamp%3D1700000000%26oauth_token%3Dtok%26oauth_version%3D1.0\
             %26q%3Dhello%2520world"
        );
        assert_eq!(
            sign(
                "GET",
                "https://api.example.com/2/tweets/search/recent",
                &params,
                "cs",
                "ts"
            ),
            "Gm1m9pjs5H8BSSj61LnmC2DPmV4="
        );
    }

    #[test]
    fn test_sign_empty_params() {
        let params = OAuthParameterSet::new();
        assert_eq!(
            signature_base_string("GET", "https://api.example.com/2/x", &params),
            "GET&https%3A%2F%2Fapi.example.com%2F2%2Fx&"
        );
        assert_eq!(
            sign("GET", "https://api.example.com/2/x", &params, "cs", "ts"),
            "p11V57vHbFyza+o8V8BiTWys8HA="
        );
    }

    #[test]
    fn test_sign_reserved_values_change_signature() {
        let mut plain = protocol_params();
        plain.insert("v", "a b");
        let mut reserved = protocol_params();
        reserved.insert("v", "a&b=c");
        let url = "https://api.example.com/2/tweets";
        assert_ne!(
            sign("GET", url, &plain, "cs", "ts"),
            sign("GET", url, &reserved, "cs", "ts")
        );
        assert!(signature_base_string("GET", url, &reserved).ends_with("v%3Da%2526b%253Dc"));
    }

    #[test]
    fn test_build_auth_header() {
        let mut params = protocol_params();
        params.insert(OAUTH_PARAM_KEY_SIGNATURE, "Ettko1D3X3o7EKs+cVjvYEwfrB8=");
        let header = build_auth_header(&params);
        assert_eq!(
            header,
            "OAuth oauth_consumer_key=\"ck\", oauth_nonce=\"abc123\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1700000000\", \
             oauth_token=\"tok\", oauth_version=\"1.0\", \
             oauth_signature=\"Ettko1D3X3o7EKs%2BcVjvYEwfrB8%3D\""
        );
        for (k, _) in params.iter() {
            assert_eq!(header.matches(&format!("{}=\"", k)).count(), 1);
        }
    }

    #[test]
    fn test_build_auth_header_keeps_supplied_order() {
        let params = [("z", "1"), ("a", "x y")]
            .iter()
            .cloned()
            .collect::<OAuthParameterSet>();
        assert_eq!(build_auth_header(&params), "OAuth z=\"1\", a=\"x%20y\"");
    }

    #[test]
    fn test_generate_nonce() {
        let nonce1 = generate_nonce();
        let nonce2 = generate_nonce();
        assert_ne!(nonce1, nonce2);
        assert!(nonce1.len() >= 33);
        assert!(nonce1.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
