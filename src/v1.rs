//! OAuth 1.0a request signing and the v2 API client built on top of it.

use percent_encoding::{utf8_percent_encode, AsciiSet};

pub mod client;
pub mod signer;
pub mod values;

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per RFC 3986 (space becomes `%20`, never `+`).
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS).to_string()
}

#[cfg(test)]
mod tests {
    use super::percent_encode;

    #[test]
    fn test_percent_encode_unreserved() {
        assert_eq!(percent_encode("AZaz09-._~"), "AZaz09-._~");
        assert_eq!(percent_encode(""), "");
    }

    #[test]
    fn test_percent_encode_reserved() {
        assert_eq!(percent_encode("hello world"), "hello%20world");
        assert_eq!(percent_encode("foo=bar&baz"), "foo%3Dbar%26baz");
        assert_eq!(percent_encode("a+b*c"), "a%2Bb%2Ac");
        assert_eq!(
            percent_encode("https://api.example.com/2/tweets"),
            "https%3A%2F%2Fapi.example.com%2F2%2Ftweets"
        );
    }

    #[test]
    fn test_percent_encode_non_ascii() {
        assert_eq!(percent_encode("ü"), "%C3%BC");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
        assert_eq!(
            percent_encode("パラメータ"),
            "%E3%83%91%E3%83%A9%E3%83%A1%E3%83%BC%E3%82%BF"
        );
    }
}
