//! Response line parser
//!
//! Classifies each normalized line as either flat (`key = value`) or
//! bracketed (`group[subkey][index] = value`) and builds a [`ResponseRecord`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize;
use super::ResponseRecord;
use crate::errors::Result;
use crate::input::split_arg;

/// Bracketed line: `group[subkey][index] = value`
///
/// Both name captures are greedy, so with extra bracket pairs the group
/// absorbs the leading ones: `a[b][c][d] = v` is group `a[b]`, subkey `c`.
static BRACKETED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(.+)\[(.+)\]\[.+\]\s*=\s*(.*)$").expect("Invalid bracketed line regex")
});

/// A single classified response line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Flat { key: &'a str, value: &'a str },
    Bracketed { group: &'a str, subkey: &'a str, value: &'a str },
    /// Contains `[` but not in the bracketed shape; dropped
    Unmatched,
}

/// Classify one normalized line
pub fn classify(line: &str) -> Result<Line<'_>> {
    if line.is_empty() {
        return Ok(Line::Blank);
    }

    if line.contains('[') {
        return Ok(match BRACKETED_RE.captures(line) {
            Some(caps) => {
                // All three groups participate in every match
                let (_, [group, subkey, value]) = caps.extract();
                Line::Bracketed { group, subkey, value }
            }
            None => Line::Unmatched,
        });
    }

    let (key, value) = split_arg(line)?;
    Ok(Line::Flat {
        key: key.trim(),
        value: value.trim(),
    })
}

/// Decode a raw response body
pub fn parse(body: &str) -> Result<ResponseRecord> {
    let mut record = ResponseRecord::new();

    for line in normalize::lines(body) {
        match classify(&line)? {
            Line::Blank => {}
            Line::Flat { key, value } => record.set_flat(key.to_lowercase(), value),
            Line::Bracketed { group, subkey, value } => {
                record.push_bracketed(&group.to_lowercase(), &subkey.to_lowercase(), value.to_string());
            }
            Line::Unmatched => {
                tracing::debug!(line = %line, "Dropping unrecognized bracketed line");
            }
        }
    }

    tracing::debug!(keys = record.len(), "Parsed response");
    Ok(record)
}
