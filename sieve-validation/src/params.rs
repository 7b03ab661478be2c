// Rule and filter parameters

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parameter key holding a regular expression. Never split into a list.
pub const PATTERN_PARAM: &str = "exp";

/// Parameter key marking a rule as required
pub const REQUIRED_PARAM: &str = "required";

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Bare key without `=value`, or an explicit boolean
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    /// The value as text, if it is a single string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The text value, or the first list item
    pub fn first(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            ParamValue::List(items) => items.first().map(String::as_str),
            ParamValue::Flag(_) => None,
        }
    }

    /// The value as a list. A single string becomes a one-item list.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            ParamValue::Text(text) => vec![text.as_str()],
            ParamValue::List(items) => items.iter().map(String::as_str).collect(),
            ParamValue::Flag(_) => Vec::new(),
        }
    }

    /// Truthiness of the value
    pub fn as_bool(&self) -> bool {
        match self {
            ParamValue::Flag(flag) => *flag,
            ParamValue::Text(text) => !matches!(text.as_str(), "" | "0" | "false"),
            ParamValue::List(items) => !items.is_empty(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ParamValue::Flag(flag) => serde_json::Value::Bool(*flag),
            ParamValue::Text(text) => serde_json::Value::String(text.clone()),
            ParamValue::List(items) => serde_json::Value::from(items.clone()),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(flag: bool) -> Self {
        ParamValue::Flag(flag)
    }
}

impl From<&str> for ParamValue {
    fn from(text: &str) -> Self {
        ParamValue::Text(text.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(text: String) -> Self {
        ParamValue::Text(text)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(items: Vec<&str>) -> Self {
        ParamValue::List(items.into_iter().map(String::from).collect())
    }
}

/// Ordered parameter bag handed to rules and filters at construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    entries: IndexMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing an earlier one with the same key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Copy of the bag without `key`
    pub fn without(&self, key: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(name, _)| name.as_str() != key)
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Get a parameter or fall back to `default`
    pub fn get_or<'a>(&'a self, key: &str, default: &'a ParamValue) -> &'a ParamValue {
        self.entries.get(key).unwrap_or(default)
    }

    /// Text of a parameter (first item for lists)
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::first)
    }

    /// Truthiness of a parameter, `false` when absent
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(ParamValue::as_bool)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_with_default() {
        let params = Params::new().with("min", "3");
        let fallback = ParamValue::from("10");

        assert_eq!(params.get_or("min", &fallback).as_str(), Some("3"));
        assert_eq!(params.get_or("max", &fallback).as_str(), Some("10"));
    }

    #[test]
    fn test_later_keys_overwrite() {
        let params = Params::new().with("min", "1").with("min", "2");

        assert_eq!(params.len(), 1);
        assert_eq!(params.get_str("min"), Some("2"));
    }

    #[test]
    fn test_truthiness() {
        let params = Params::new()
            .with("required", true)
            .with("strict", "false")
            .with("tags", vec!["b", "i"]);

        assert!(params.get_bool("required"));
        assert!(!params.get_bool("strict"));
        assert!(params.get_bool("tags"));
        assert!(!params.get_bool("missing"));
    }

    #[test]
    fn test_first_and_list() {
        let list = ParamValue::from(vec!["a", "b"]);
        assert_eq!(list.first(), Some("a"));
        assert_eq!(list.as_list(), vec!["a", "b"]);

        let text = ParamValue::from("a");
        assert_eq!(text.as_list(), vec!["a"]);
        assert!(ParamValue::Flag(true).as_list().is_empty());
    }

    #[test]
    fn test_without_keeps_order() {
        let params = Params::new()
            .with("required", true)
            .with("min", "3")
            .with("max", "8");

        let trimmed = params.without("required");
        let keys: Vec<&str> = trimmed.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["min", "max"]);
    }

    #[test]
    fn test_to_json() {
        let params = Params::new().with("tags", vec!["b", "i"]).with("required", true);
        let json = params.to_json();

        assert_eq!(json["tags"], serde_json::json!(["b", "i"]));
        assert_eq!(json["required"], serde_json::json!(true));
    }
}
