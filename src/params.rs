//! Route parameters, query strings and URL component encoding.
//!
//! This module provides two complementary types for working with URL data:
//!
//! - [`RouteParams`]: an ordered name → value map used both for parameters
//!   bound while matching (e.g. `:controller` in `/:controller[/:action]`)
//!   and for parameters handed to assembly. Supports typed access via
//!   [`get_as`](RouteParams::get_as), overlay merging via
//!   [`merge`](RouteParams::merge), and conversion from any key/value
//!   iterable or from a dynamic [`serde_json::Value`].
//! - [`QueryParams`]: query string parameters for the `?key=value&...`
//!   portion of an assembled URL. Supports multi-valued keys.
//!
//! Order matters for assembly: a wildcard route emits its parameters in the
//! order they appear, so `RouteParams` keeps insertion order and overwriting
//! a key keeps its original position.
//!
//! # Example
//!
//! ```
//! use mvc_router::{QueryParams, RouteParams};
//!
//! let params = RouteParams::from([("controller", "ctrl"), ("action", "act")]);
//! assert_eq!(params.get("action"), Some("act"));
//!
//! let query = QueryParams::from_query_string("page=1&sort=name");
//! assert_eq!(query.get_as::<u32>("page"), Some(1));
//! ```

use crate::error::RouterError;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::BuildHasher;

/// Ordered route parameters.
///
/// Equality ignores order: two parameter sets are equal when they hold the
/// same keys with the same values.
///
/// # Example
///
/// ```
/// use mvc_router::RouteParams;
///
/// let mut params = RouteParams::new();
/// params.insert("id", "123");
///
/// assert_eq!(params.get("id"), Some("123"));
/// assert_eq!(params.get_as::<i32>("id"), Some(123));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteParams {
    entries: Vec<(String, String)>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get a parameter and parse it as a specific type
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter, returning the previous value.
    ///
    /// An overwritten key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate over all `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Overlay `overlay` on top of `base`.
    ///
    /// Keys from `overlay` win on collision; keys only present in `overlay`
    /// are appended after those of `base`.
    ///
    /// # Example
    ///
    /// ```
    /// use mvc_router::RouteParams;
    ///
    /// let matched = RouteParams::from([("controller", "foo"), ("action", "index")]);
    /// let explicit = RouteParams::from([("action", "bar")]);
    ///
    /// let merged = RouteParams::merge(&matched, &explicit);
    /// assert_eq!(merged.get("controller"), Some("foo"));
    /// assert_eq!(merged.get("action"), Some("bar"));
    /// ```
    pub fn merge(base: &RouteParams, overlay: &RouteParams) -> RouteParams {
        let mut merged = base.clone();
        merged.extend(overlay.iter());
        merged
    }

    /// Return a copy without the given keys.
    pub fn without<S: AsRef<str>>(&self, keys: &[S]) -> RouteParams {
        self.entries
            .iter()
            .filter(|(k, _)| !keys.iter().any(|excluded| excluded.as_ref() == k.as_str()))
            .cloned()
            .collect()
    }
}

impl PartialEq for RouteParams {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for RouteParams {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RouteParams::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RouteParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for RouteParams {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for RouteParams {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>, S: BuildHasher> From<HashMap<K, V, S>> for RouteParams {
    fn from(map: HashMap<K, V, S>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for RouteParams {
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl From<&RouteParams> for RouteParams {
    fn from(params: &RouteParams) -> Self {
        params.clone()
    }
}

impl IntoIterator for RouteParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a RouteParams {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Convert a dynamic template value into route parameters.
///
/// Accepted shapes:
///
/// - `null`: no parameters
/// - an object: every member becomes a parameter
/// - an array of `[key, value]` pairs
///
/// Values must be strings, numbers or booleans. Anything else is rejected
/// with [`RouterError::InvalidParams`].
impl TryFrom<&serde_json::Value> for RouteParams {
    type Error = RouterError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(RouteParams::new()),
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| -> Result<(String, String), RouterError> {
                    Ok((key.clone(), scalar_to_string(value)?))
                })
                .collect(),
            Value::Array(pairs) => pairs
                .iter()
                .map(|pair| -> Result<(String, String), RouterError> {
                    match pair.as_array().map(Vec::as_slice) {
                        Some([key, value]) => Ok((scalar_to_string(key)?, scalar_to_string(value)?)),
                        _ => Err(RouterError::invalid_params(
                            "Params is expected to be a sequence of [key, value] pairs",
                        )),
                    }
                })
                .collect(),
            _ => Err(RouterError::invalid_params(
                "Params is expected to be a map or a sequence of key/value pairs",
            )),
        }
    }
}

fn scalar_to_string(value: &serde_json::Value) -> Result<String, RouterError> {
    use serde_json::Value;

    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(RouterError::invalid_params(
            "Param values must be strings, numbers or booleans",
        )),
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters appended to an assembled URL.
///
/// Supports multiple values for the same key and keeps insertion order, so
/// the serialized query string is deterministic.
///
/// # Example
///
/// ```
/// use mvc_router::QueryParams;
///
/// let query = QueryParams::from_query_string("page=1&sort=name&tag=rust&tag=web");
///
/// assert_eq!(query.get("page"), Some("1"));
/// assert_eq!(query.get_all("tag"), vec!["rust", "web"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create empty query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a query string (without the leading `?`).
    ///
    /// `+` decodes to a space; pairs without `=` become empty values.
    pub fn from_query_string(query: &str) -> Self {
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_query_component(key), decode_query_component(value))
            })
            .collect();

        Self { pairs }
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get all values for a key, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Get the first value for a key, parsed as type `T`.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Append a value for the given key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Serialize into a query string (without the leading `?`).
    ///
    /// # Example
    ///
    /// ```
    /// use mvc_router::QueryParams;
    ///
    /// let mut query = QueryParams::new();
    /// query.insert("q", "rust router");
    /// query.insert("page", "2");
    /// assert_eq!(query.to_query_string(), "q=rust%20router&page=2");
    /// ```
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    encode_uri_component(key),
                    encode_uri_component(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Return the number of unique parameter keys.
    pub fn len(&self) -> usize {
        self.pairs
            .iter()
            .map(|(key, _)| key.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Characters a path segment may carry without escaping, besides the
/// unreserved set.
const PATH_SEGMENT_EXTRA: &[u8] = b"!$&'()*+,:;=@";

/// Characters a fragment may carry without escaping, besides the path set.
const FRAGMENT_EXTRA: &[u8] = b"/?";

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

fn encode_with(s: &str, keep: impl Fn(u8) -> bool) -> String {
    let mut encoded = String::with_capacity(s.len());
    for &byte in s.as_bytes() {
        if keep(byte) {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

/// Percent-encode everything outside the unreserved set (RFC 3986).
///
/// ```
/// use mvc_router::encode_uri_component;
///
/// assert_eq!(encode_uri_component("hello world"), "hello%20world");
/// assert_eq!(encode_uri_component("a/b"), "a%2Fb");
/// ```
pub fn encode_uri_component(s: &str) -> String {
    encode_with(s, is_unreserved)
}

/// Percent-encode a value for use inside a single path segment.
///
/// Sub-delimiters plus `:` and `@` stay literal; `/`, `?`, `#`, `%` and
/// non-ASCII bytes are escaped.
///
/// ```
/// use mvc_router::encode_path_segment;
///
/// assert_eq!(encode_path_segment("a+b=c"), "a+b=c");
/// assert_eq!(encode_path_segment("a/b c"), "a%2Fb%20c");
/// ```
pub fn encode_path_segment(s: &str) -> String {
    encode_with(s, |b| is_unreserved(b) || PATH_SEGMENT_EXTRA.contains(&b))
}

/// Percent-encode a URL fragment.
pub fn encode_fragment(s: &str) -> String {
    encode_with(s, |b| {
        is_unreserved(b) || PATH_SEGMENT_EXTRA.contains(&b) || FRAGMENT_EXTRA.contains(&b)
    })
}

/// Decode `%XX` escapes. `+` is left untouched.
///
/// Malformed escapes are kept verbatim; invalid UTF-8 is replaced.
pub fn decode_uri_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                decoded.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    char::from(byte).to_digit(16).and_then(|d| u8::try_from(d).ok())
}

fn decode_query_component(s: &str) -> String {
    decode_uri_component(&s.replace('+', " "))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_params_basic() {
        let mut params = RouteParams::new();
        params.insert("id", "123");

        assert_eq!(params.get("id"), Some("123"));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
    }

    #[test]
    fn test_route_params_get_as() {
        let params = RouteParams::from([("id", "123"), ("active", "true")]);

        assert_eq!(params.get_as::<i32>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("active"), Some(true));
        assert_eq!(params.get_as::<i32>("missing"), None);
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut params = RouteParams::from([("a", "1"), ("b", "2")]);
        let previous = params.insert("a", "3");

        assert_eq!(previous, Some("1".to_string()));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(params.get("a"), Some("3"));
    }

    #[test]
    fn test_merge_overlay_wins() {
        let base = RouteParams::from([("controller", "foo"), ("view", "list")]);
        let overlay = RouteParams::from([("view", "grid"), ("page", "2")]);

        let merged = RouteParams::merge(&base, &overlay);
        assert_eq!(merged.get("controller"), Some("foo"));
        assert_eq!(merged.get("view"), Some("grid"));
        assert_eq!(
            merged.keys().collect::<Vec<_>>(),
            vec!["controller", "view", "page"]
        );
    }

    #[test]
    fn test_merge_with_empty() {
        let params = RouteParams::from([("id", "1")]);
        assert_eq!(RouteParams::merge(&RouteParams::new(), &params), params);
        assert_eq!(RouteParams::merge(&params, &RouteParams::new()), params);
    }

    #[test]
    fn test_without() {
        let params = RouteParams::from([("controller", "a"), ("action", "b"), ("page", "3")]);
        let rest = params.without(&["controller", "action"]);
        assert_eq!(rest, RouteParams::from([("page", "3")]));
    }

    #[test]
    fn test_equality_ignores_order() {
        let left = RouteParams::from([("a", "1"), ("b", "2")]);
        let right = RouteParams::from([("b", "2"), ("a", "1")]);
        assert_eq!(left, right);
    }

    #[test]
    fn test_from_hash_map_and_iterator() {
        let mut map = HashMap::new();
        map.insert("controller".to_string(), "ctrl".to_string());
        let from_map = RouteParams::from(map);

        let from_iter: RouteParams = vec![("controller", "ctrl")].into_iter().collect();
        assert_eq!(from_map, from_iter);
    }

    #[test]
    fn test_try_from_json_object() {
        let params = RouteParams::try_from(&json!({"controller": "ctrl", "page": 2})).unwrap();
        assert_eq!(params.get("controller"), Some("ctrl"));
        assert_eq!(params.get("page"), Some("2"));
    }

    #[test]
    fn test_try_from_json_pairs_and_null() {
        let params = RouteParams::try_from(&json!([["action", "act"]])).unwrap();
        assert_eq!(params.get("action"), Some("act"));

        assert!(RouteParams::try_from(&serde_json::Value::Null)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_try_from_json_rejects_scalars() {
        let err = RouteParams::try_from(&json!("invalid params")).unwrap_err();
        assert!(err.is_invalid_argument());

        assert!(RouteParams::try_from(&json!(42)).is_err());
        assert!(RouteParams::try_from(&json!([["only-key"]])).is_err());
        assert!(RouteParams::try_from(&json!({"nested": {"a": 1}})).is_err());
    }

    #[test]
    fn test_query_params_basic() {
        let query = QueryParams::from_query_string("page=1&sort=name&filter=active");

        assert_eq!(query.get("page"), Some("1"));
        assert_eq!(query.get("sort"), Some("name"));
        assert_eq!(query.get("missing"), None);
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn test_query_params_multiple_values() {
        let query = QueryParams::from_query_string("tag=rust&tag=web&tag=ui");

        assert_eq!(query.get_all("tag"), vec!["rust", "web", "ui"]);
        assert_eq!(query.get("tag"), Some("rust"));
        assert_eq!(query.len(), 1);

        let mixed = QueryParams::from_query_string("a=1&b=2&a=3&c=4&b=5");
        assert_eq!(mixed.len(), 3);
    }

    #[test]
    fn test_query_string_round_trip_order() {
        let query: QueryParams = vec![("b", "2"), ("a", "x y")].into_iter().collect();
        assert_eq!(query.to_query_string(), "b=2&a=x%20y");
    }

    #[test]
    fn test_empty_query_string() {
        assert!(QueryParams::from_query_string("").is_empty());
    }

    #[test]
    fn test_uri_encoding() {
        assert_eq!(encode_uri_component("hello world"), "hello%20world");
        assert_eq!(encode_uri_component("test@example.com"), "test%40example.com");
        assert_eq!(encode_uri_component("ü"), "%C3%BC");
    }

    #[test]
    fn test_path_segment_encoding() {
        assert_eq!(encode_path_segment("user@host:8080"), "user@host:8080");
        assert_eq!(encode_path_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_path_segment("100%"), "100%25");
    }

    #[test]
    fn test_uri_decoding() {
        assert_eq!(decode_uri_component("hello%20world"), "hello world");
        assert_eq!(decode_uri_component("a+b"), "a+b");
        assert_eq!(decode_uri_component("%C3%BC"), "ü");
        assert_eq!(decode_uri_component("100%"), "100%");
        assert_eq!(decode_uri_component("%zz"), "%zz");
        assert_eq!(decode_uri_component("%+F"), "%+F");
        assert_eq!(decode_uri_component("100%+1"), "100%+1");
        assert_eq!(decode_uri_component("%2f%2F"), "//");
        assert_eq!(decode_query_component("hello+world"), "hello world");
    }
}
