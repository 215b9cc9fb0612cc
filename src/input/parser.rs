//! `key=value` parsing
//!
//! The same split routine serves command-line tokens, interactive stdin lines
//! and flat response lines, so a malformed line fails the same way whatever
//! its source.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, UdrError};

/// First positional token that names the API command.
///
/// Either a bare word without `=`, or an explicit `command=<name>`.
static COMMAND_SHORTCUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(command=.+|[^=]+)$").expect("Invalid command regex"));

/// Split `key=value` at the first `=`.
///
/// The value may be empty and may itself contain `=`. Input without any `=`
/// is a [`UdrError::MalformedArgument`] carrying the offending text.
pub fn split_arg(input: &str) -> Result<(&str, &str)> {
    input.split_once('=').ok_or_else(|| UdrError::malformed(input))
}

/// If `token` is a command shortcut, return the command name.
pub fn command_shortcut(token: &str) -> Option<&str> {
    if !COMMAND_SHORTCUT.is_match(token) {
        return None;
    }
    Some(token.strip_prefix("command=").unwrap_or(token))
}

/// Expand an extension option `--name=v1;v2;...` into parameters.
///
/// A single value stays under `name`; several values become `name0`,
/// `name1`, ... in order. An empty name yields nothing.
pub fn expand_option(name: &str, value: &str) -> Vec<(String, String)> {
    if name.is_empty() {
        return Vec::new();
    }

    let values: Vec<&str> = value.split(';').collect();
    if values.len() == 1 {
        return vec![(name.to_string(), value.to_string())];
    }

    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (format!("{}{}", name, i), v.to_string()))
        .collect()
}
