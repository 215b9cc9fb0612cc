//! API response decoding
//!
//! The reseller API answers in a line-oriented plaintext format rather than
//! JSON:
//!
//! ```text
//! [RESPONSE]
//! code = 200
//! description = Command completed successfully
//! property[name][0] = example.com
//! property[name][1] = example.org
//! EOF
//! ```
//!
//! - [`normalize`] - named cleanup steps applied to the raw body
//! - [`parser`] - line classification into a [`ResponseRecord`]

pub mod normalize;
pub mod parser;

use std::collections::BTreeMap;

use serde::Serialize;

pub use parser::parse;

/// Value stored under a top-level response key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// From a flat `key = value` line
    Flat(String),
    /// From bracketed `group[subkey][index] = value` lines, values in body order
    Nested(BTreeMap<String, Vec<String>>),
}

/// Decoded API response, keyed by lowercased group name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseRecord(BTreeMap<String, ResponseValue>);

impl ResponseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ResponseValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Result code reported by the API, if present as a flat value
    pub fn code(&self) -> Option<&str> {
        match self.0.get("code") {
            Some(ResponseValue::Flat(code)) => Some(code),
            _ => None,
        }
    }

    /// Values collected for `group[subkey]`, if any
    #[cfg(test)]
    pub fn values(&self, group: &str, subkey: &str) -> Option<&[String]> {
        match self.0.get(group) {
            Some(ResponseValue::Nested(fields)) => fields.get(subkey).map(Vec::as_slice),
            _ => None,
        }
    }

    /// Store a flat value, replacing whatever the key held before
    pub fn set_flat(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), ResponseValue::Flat(value.into()));
    }

    /// Append a value to `group[subkey]`.
    ///
    /// A group that held a flat value is turned into a nested mapping.
    pub fn push_bracketed(&mut self, group: &str, subkey: &str, value: String) {
        let entry = self
            .0
            .entry(group.to_string())
            .or_insert_with(|| ResponseValue::Nested(BTreeMap::new()));

        if let ResponseValue::Flat(_) = entry {
            *entry = ResponseValue::Nested(BTreeMap::new());
        }

        if let ResponseValue::Nested(fields) = entry {
            fields.entry(subkey.to_string()).or_default().push(value);
        }
    }

    /// Pretty JSON rendering used for terminal output
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_bracketed_preserves_order() {
        let mut record = ResponseRecord::new();
        record.push_bracketed("property", "name", "b".to_string());
        record.push_bracketed("property", "name", "a".to_string());
        assert_eq!(
            record.values("property", "name").unwrap(),
            &["b".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_bracketed_replaces_flat() {
        let mut record = ResponseRecord::new();
        record.set_flat("property", "x");
        record.push_bracketed("property", "name", "example.com".to_string());
        assert_eq!(
            record.values("property", "name").unwrap(),
            &["example.com".to_string()]
        );
    }

    #[test]
    fn test_flat_replaces_nested() {
        let mut record = ResponseRecord::new();
        record.push_bracketed("code", "x", "1".to_string());
        record.set_flat("code", "200");
        assert_eq!(record.code(), Some("200"));
    }

    #[test]
    fn test_json_shape() {
        let mut record = ResponseRecord::new();
        record.set_flat("code", "200");
        record.push_bracketed("property", "name", "example.com".to_string());

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "200",
                "property": {"name": ["example.com"]}
            })
        );
    }
}
