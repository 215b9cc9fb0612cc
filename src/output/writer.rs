//! Output writer for API results
//!
//! Writers take any `io::Write` so tests can capture output in a buffer.

use std::io::{self, Write};

use crate::input::ArgumentMap;
use crate::response::ResponseRecord;

/// Pretty-print a parsed response as JSON
pub fn write_record<W: Write>(out: &mut W, record: &ResponseRecord) -> io::Result<()> {
    writeln!(out, "{}", record.to_pretty_json())?;
    out.flush()
}

/// Print a response body exactly as received.
///
/// A final newline is added only when the body lacks one.
pub fn write_raw<W: Write>(out: &mut W, body: &str) -> io::Result<()> {
    out.write_all(body.as_bytes())?;
    if !body.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Print the collected parameters with the password redacted
pub fn write_args<W: Write>(out: &mut W, args: &ArgumentMap) -> io::Result<()> {
    writeln!(out, "{}", args)?;
    out.flush()
}
