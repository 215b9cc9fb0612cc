//! Input parsing module
//!
//! Holds the argument map sent to the API as query parameters, and the
//! `key=value` parsing shared by command-line tokens, interactive input and
//! flat response lines.

mod parser;

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

pub use parser::{command_shortcut, expand_option, split_arg};

/// Query parameter keys the API requires on every call
pub const LOGIN_KEY: &str = "s_login";
pub const PASSWORD_KEY: &str = "s_pw";
pub const COMMAND_KEY: &str = "command";

/// Parameters for one API call
///
/// Keeps insertion order so the query string reads in the order the user
/// supplied things. Writing an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgumentMap(IndexMap<String, String>);

impl ArgumentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, overwriting any earlier value for the same key.
    ///
    /// Keys starting with `=` come from stray separators (`==x`, `=x=y`)
    /// and are never sent.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.starts_with('=') {
            tracing::debug!(key = %key, "Ignoring parameter with separator key");
            return;
        }
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_credentials(&mut self, login: impl Into<String>, password: impl Into<String>) {
        self.insert(LOGIN_KEY, login);
        self.insert(PASSWORD_KEY, password);
    }

    /// Copy with the password replaced, for debug output
    pub fn redacted(&self) -> ArgumentMap {
        let mut copy = self.clone();
        if let Some(pw) = copy.0.get_mut(PASSWORD_KEY) {
            if !pw.is_empty() {
                *pw = "[REDACTED]".to_string();
            }
        }
        copy
    }
}

impl fmt::Display for ArgumentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.redacted()).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ArgumentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ArgumentMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
