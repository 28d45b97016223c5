//! Query parameter set with deterministic encoding
//!
//! Signer and verifier must render the same parameters to the same string,
//! so encoding sorts by key and escapes each component the same way every
//! time: unreserved characters (`A-Z a-z 0-9 - _ . ~`) are kept, a space
//! becomes `+`, every other byte is written as `%XX`.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

const QUERY_COMPONENT: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Escape a single key, value or app id for use in a query string.
pub fn escape(component: &str) -> String {
    // A literal '%' is escaped to "%25", so "%20" can only come from a space.
    utf8_percent_encode(component, QUERY_COMPONENT).to_string().replace("%20", "+")
}

/// Multi-valued query parameters, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// An empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw (already percent-encoded) query string.
    ///
    /// Repeated keys keep all their values in order of appearance.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::new();
        if let Some(query) = query {
            for (key, value) in form_urlencoded::parse(query.as_bytes()) {
                params.append(key.into_owned(), value.into_owned());
            }
        }
        params
    }

    /// Replace every value of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), vec![value.into()]);
    }

    /// Add `value` after any existing values of `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    /// All values of `key`, empty when absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Drop `key`, returning its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.entries.remove(key)
    }

    /// Whether `key` has at least one value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key.as_str(), value.as_str())))
    }

    /// Render as `k1=v1&k2=v2`, sorted by key.
    pub fn encode(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", escape(key), escape(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sorts_by_key() {
        let mut params = QueryParams::new();
        params.set("ts", "1");
        params.set("b", "2");
        params.set("a", "3");
        assert_eq!(params.encode(), "a=3&b=2&ts=1");
    }

    #[test]
    fn test_escape_rules() {
        assert_eq!(escape("2023-01-01T00:00:00Z"), "2023-01-01T00%3A00%3A00Z");
        assert_eq!(escape("a b"), "a+b");
        assert_eq!(escape("x~y_z.-"), "x~y_z.-");
        assert_eq!(escape("*/+=&"), "%2A%2F%2B%3D%26");
        assert_eq!(escape("100%20"), "100%2520");
        assert_eq!(escape("é"), "%C3%A9");
    }

    #[test]
    fn test_from_query_decodes_and_keeps_repeats() {
        let params = QueryParams::from_query(Some("tag=b&tag=a&name=hello+world&x=%2F"));
        assert_eq!(params.get_all("tag"), ["b", "a"]);
        assert_eq!(params.get("name"), Some("hello world"));
        assert_eq!(params.get("x"), Some("/"));
        assert_eq!(params.encode(), "name=hello+world&tag=b&tag=a&x=%2F");
    }

    #[test]
    fn test_set_overwrites_all_values() {
        let mut params = QueryParams::from_query(Some("ts=old&ts=older"));
        params.set("ts", "new");
        assert_eq!(params.get_all("ts"), ["new"]);
    }

    #[test]
    fn test_remove() {
        let mut params = QueryParams::from_query(Some("a=1&b=2&a=3"));
        assert_eq!(params.remove("a"), Some(vec!["1".to_string(), "3".to_string()]));
        assert!(!params.contains_key("a"));
        assert_eq!(params.encode(), "b=2");
    }

    #[test]
    fn test_empty() {
        assert!(QueryParams::from_query(None).is_empty());
        assert!(QueryParams::from_query(Some("")).is_empty());
        assert_eq!(QueryParams::new().encode(), "");
        assert!(QueryParams::new().get_all("missing").is_empty());
    }
}
