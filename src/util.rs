use crate::parameters::Payload;
use crate::v1::percent_encode;

/// Append an endpoint path to the API base URL with exactly one `/` between.
pub fn join_endpoint(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Literal query string for a payload, in insertion order, RFC 3986 encoded.
pub fn build_query_string(payload: &Payload) -> String {
    payload
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(&v.to_string())))
        .collect::<Vec<String>>()
        .join("&")
}

#[test]
fn test_join_endpoint() {
    assert_eq!(
        join_endpoint("https://api.twitter.com/2/", "tweets"),
        "https://api.twitter.com/2/tweets"
    );
    assert_eq!(
        join_endpoint("https://api.twitter.com/2", "/users/me"),
        "https://api.twitter.com/2/users/me"
    );
}

#[test]
fn test_build_query_string() {
    let payload = Payload::new()
        .with("q", "hello world")
        .with("max_results", 10)
        .with("a&b", "c=d");
    assert_eq!(
        build_query_string(&payload),
        "q=hello%20world&max_results=10&a%26b=c%3Dd"
    );
    assert_eq!(build_query_string(&Payload::new()), "");
}
