//! Request Parameters
//!
//! Ordered string-to-string parameter mapping shared by every pipeline stage.
//! A request carries two of these: the original view (what the client sent)
//! and the active view, which stages may replace with an overlaid copy.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Primary query parameter.
pub const Q: &str = "q";
/// Alternate query parameter, consulted when no primary query is supplied.
pub const ALT_Q: &str = "q.alt";

/// An ordered mapping from parameter names to values.
///
/// Insertion order is preserved so diagnostic dumps read the way the client
/// sent the request. All layering operations (`overlaid_with`,
/// `with_defaults`) return a new mapping and leave `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams {
    entries: IndexMap<String, String>,
}

impl RequestParams {
    /// Create an empty parameter mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a slice of name/value pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs.iter().copied().collect()
    }

    /// Look up a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a parameter value, falling back to `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Parse a parameter as a boolean flag.
    ///
    /// Accepts `true`/`on`/`yes`/`1` and `false`/`off`/`no`/`0` in any case.
    /// Absent or unparseable values yield `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => true,
                "false" | "off" | "no" | "0" => false,
                _ => default,
            },
            None => default,
        }
    }

    /// Set a parameter, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a parameter, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// Whether a parameter is present (even with an empty value).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over name/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A new mapping equal to `self` with every `overlay` entry layered on
    /// top. Overlay entries win on name collision; colliding names keep
    /// their original position.
    pub fn overlaid_with(&self, overlay: &RequestParams) -> RequestParams {
        let mut merged = self.clone();
        for (key, value) in overlay.iter() {
            merged.set(key, value);
        }
        merged
    }

    /// A new mapping where `defaults` fill in only the names `self` does not
    /// carry. Existing entries win, even when their value is empty.
    pub fn with_defaults(&self, defaults: &RequestParams) -> RequestParams {
        let mut merged = self.clone();
        for (key, value) in defaults.iter() {
            if !merged.contains(key) {
                merged.set(key, value);
            }
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_insertion_order_preserved() {
        let params = RequestParams::from_pairs(&[("z", "1"), ("a", "2"), ("m", "3")]);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[rstest]
    #[case("true", true)]
    #[case("on", true)]
    #[case("yes", true)]
    #[case("1", true)]
    #[case("ON", true)]
    #[case("false", false)]
    #[case("off", false)]
    #[case("no", false)]
    #[case("0", false)]
    fn test_get_bool_spellings(#[case] value: &str, #[case] expected: bool) {
        let params = RequestParams::from_pairs(&[("flag", value)]);
        assert_eq!(params.get_bool("flag", !expected), expected);
    }

    #[test]
    fn test_get_bool_defaults() {
        let params = RequestParams::from_pairs(&[("flag", "maybe")]);
        assert!(params.get_bool("missing", true));
        assert!(!params.get_bool("missing", false));
        // unparseable values fall back to the default
        assert!(params.get_bool("flag", true));
        assert!(!params.get_bool("flag", false));
    }

    #[test]
    fn test_get_or() {
        let params = RequestParams::from_pairs(&[("set", "value")]);
        assert_eq!(params.get_or("set", "fallback"), "value");
        assert_eq!(params.get_or("unset", "fallback"), "fallback");
    }

    #[test]
    fn test_overlay_wins() {
        let base = RequestParams::from_pairs(&[("q", "cat"), ("rows", "10")]);
        let overlay = RequestParams::from_pairs(&[("q", "dog"), ("qq", "cat")]);

        let merged = base.overlaid_with(&overlay);
        assert_eq!(merged.get("q"), Some("dog"));
        assert_eq!(merged.get("rows"), Some("10"));
        assert_eq!(merged.get("qq"), Some("cat"));
        // base is untouched
        assert_eq!(base.get("q"), Some("cat"));
        assert!(!base.contains("qq"));
    }

    #[test]
    fn test_defaults_do_not_override() {
        let client = RequestParams::from_pairs(&[("q", "cat"), ("empty", "")]);
        let defaults = RequestParams::from_pairs(&[("q", "dog"), ("empty", "full"), ("extra", "x")]);

        let merged = client.with_defaults(&defaults);
        assert_eq!(merged.get("q"), Some("cat"));
        // a present-but-empty client value still wins over a default
        assert_eq!(merged.get("empty"), Some(""));
        assert_eq!(merged.get("extra"), Some("x"));
    }

    #[test]
    fn test_remove() {
        let mut params = RequestParams::from_pairs(&[("a", "1"), ("b", "2")]);
        assert_eq!(params.remove("a"), Some("1".to_string()));
        assert_eq!(params.remove("a"), None);
        assert!(!params.contains("a"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_empty_value_is_present() {
        let params = RequestParams::from_pairs(&[("blank", "")]);
        assert!(params.contains("blank"));
        assert_eq!(params.get("blank"), Some(""));
    }
}
