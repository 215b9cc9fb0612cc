//! Body normalization
//!
//! Cleanup applied to a response body before it is split into lines. Each
//! step is a plain `&str -> String` function so it can be tested on its own;
//! [`STEPS`] fixes the order.

/// A named normalization step
#[derive(Clone, Copy)]
pub struct Step {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

const RESPONSE_MARKER: &str = "[RESPONSE]";
const EOF_MARKER: &str = "EOF";

/// Steps in application order
pub const STEPS: &[Step] = &[
    Step { name: "crlf", apply: unify_line_endings },
    Step { name: "response-marker", apply: strip_response_marker },
    Step { name: "eof-marker", apply: strip_eof_marker },
    Step { name: "tabs", apply: remove_tabs },
    Step { name: "blank-lines", apply: collapse_blank_lines },
];

/// Run every step in order
pub fn normalize(body: &str) -> String {
    STEPS.iter().fold(body.to_string(), |text, step| {
        let out = (step.apply)(&text);
        if out.len() != text.len() {
            tracing::trace!(step = step.name, before = text.len(), after = out.len(), "Normalized body");
        }
        out
    })
}

/// Normalize then split into lines
pub fn lines(body: &str) -> Vec<String> {
    normalize(body).split('\n').map(str::to_string).collect()
}

/// `\r\n` -> `\n`
pub fn unify_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Drop a leading `[RESPONSE]` line
pub fn strip_response_marker(text: &str) -> String {
    match text.strip_prefix(RESPONSE_MARKER) {
        Some("") => String::new(),
        Some(rest) if rest.starts_with('\n') => rest[1..].to_string(),
        _ => text.to_string(),
    }
}

/// Drop a trailing `EOF` line along with any newlines after it
pub fn strip_eof_marker(text: &str) -> String {
    let trimmed = text.trim_end_matches('\n');
    if trimmed == EOF_MARKER {
        return String::new();
    }
    match trimmed.strip_suffix(EOF_MARKER) {
        Some(rest) if rest.ends_with('\n') => rest[..rest.len() - 1].to_string(),
        _ => text.to_string(),
    }
}

/// Remove every tab character
pub fn remove_tabs(text: &str) -> String {
    text.replace('\t', "")
}

/// Collapse runs of line terminators into one
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_newline = false;
    for c in text.chars() {
        if c == '\n' {
            if prev_newline {
                continue;
            }
            prev_newline = true;
        } else {
            prev_newline = false;
        }
        out.push(c);
    }
    out
}
