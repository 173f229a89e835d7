use serde_json::{Map, Number, Value};
use std::fmt;

/// A primitive request payload value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    StringValue(String),
    IntValue(i64),
    FloatValue(f64),
    BoolValue(bool),
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::StringValue(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::StringValue(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::IntValue(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::IntValue(n.into())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::IntValue(n.into())
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::FloatValue(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::BoolValue(b)
    }
}

/// Text form used for signing and for the literal query string.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::StringValue(s) => f.write_str(s),
            ParamValue::IntValue(n) => write!(f, "{}", n),
            // Same text as the JSON body, which has no NaN or infinity
            ParamValue::FloatValue(n) if !n.is_finite() => f.write_str("null"),
            ParamValue::FloatValue(n) => write!(f, "{}", n),
            ParamValue::BoolValue(b) => write!(f, "{}", b),
        }
    }
}

impl From<&ParamValue> for Value {
    fn from(v: &ParamValue) -> Self {
        match v {
            ParamValue::StringValue(s) => Value::String(s.clone()),
            ParamValue::IntValue(n) => Value::from(*n),
            // JSON has no NaN or infinity
            ParamValue::FloatValue(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            ParamValue::BoolValue(b) => Value::Bool(*b),
        }
    }
}

/// Request payload: string keys to primitive values, in insertion order.
///
/// Inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Payload {
    entries: Vec<(String, ParamValue)>,
}

impl Payload {
    pub fn new() -> Self {
        Payload::default()
    }

    /// Builder-style [`Payload::insert`].
    pub fn with<K: Into<String>, V: Into<ParamValue>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<ParamValue>>(&mut self, key: K, value: V) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        for (k, v) in iter {
            payload.insert(k, v);
        }
        payload
    }
}

impl From<&Payload> for Value {
    fn from(payload: &Payload) -> Self {
        let map = payload
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v)))
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }
}

/// OAuth parameter set: unencoded name/value pairs in insertion order.
///
/// Signing sorts a copy; header rendering uses the stored order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OAuthParameterSet {
    params: Vec<(String, String)>,
}

impl OAuthParameterSet {
    pub fn new() -> Self {
        OAuthParameterSet::default()
    }

    /// Insert a parameter, replacing the value of an existing key in place.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(param) => param.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Merge every payload entry, later values winning.
    pub fn merge_payload(&mut self, payload: &Payload) -> &mut Self {
        for (k, v) in payload.iter() {
            self.insert(k, v.to_string());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs sorted ascending by key bytes.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut sorted = self.iter().collect::<Vec<(&str, &str)>>();
        sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        sorted
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OAuthParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = OAuthParameterSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_insert_replaces_in_place() {
        let mut payload = Payload::new().with("a", 1).with("b", "two");
        payload.insert("a", true);
        let keys = payload.iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(payload.get("a"), Some(&ParamValue::BoolValue(true)));
        assert_eq!(payload.len(), 2);
    }

    #[test]
    fn test_payload_to_json_object() {
        let payload = Payload::new()
            .with("text", "hi \"there\"")
            .with("count", 3)
            .with("ratio", 0.5)
            .with("reply", false);
        let json = Value::from(&payload);
        assert_eq!(
            json,
            serde_json::json!({"text": "hi \"there\"", "count": 3, "ratio": 0.5, "reply": false})
        );
        assert_eq!(Value::from(&Payload::new()).to_string(), "{}");
        assert_eq!(Value::from(&ParamValue::from(f64::NAN)), Value::Null);
    }

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::from("x y").to_string(), "x y");
        assert_eq!(ParamValue::from(-42).to_string(), "-42");
        assert_eq!(ParamValue::from(1.5).to_string(), "1.5");
        assert_eq!(ParamValue::from(true).to_string(), "true");
    }

    #[test]
    fn test_non_finite_float_renders_like_json() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let value = ParamValue::from(n);
            assert_eq!(value.to_string(), Value::from(&value).to_string());
            assert_eq!(value.to_string(), "null");
        }
    }

    #[test]
    fn test_parameter_set_sorted_bytewise() {
        let set = [("b", "2"), ("B", "3"), ("a", "1"), ("_", "4")]
            .iter()
            .cloned()
            .collect::<OAuthParameterSet>();
        let keys = set.sorted().into_iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec!["B", "_", "a", "b"]);
        // insertion order untouched
        assert_eq!(set.iter().next(), Some(("b", "2")));
    }

    #[test]
    fn test_parameter_set_merge_payload_later_wins() {
        let mut set = OAuthParameterSet::new();
        set.insert("oauth_token", "tok").insert("q", "old");
        set.merge_payload(&Payload::new().with("q", "hello world").with("max", 10));
        assert_eq!(set.get("q"), Some("hello world"));
        assert_eq!(set.get("max"), Some("10"));
        assert_eq!(set.len(), 3);
        assert!(set.contains_key("oauth_token"));
    }
}
