//! Exit status codes for the CLI
//!
//! udrcmd keeps the two exit codes of the reseller tooling it replaces:
//! - 0: the API reported success (code 200), raw output, help, or interrupt
//! - 2: any local failure, or an API error / unknown result code

use std::process::{ExitCode, Termination};

use crate::response::{ResponseRecord, ResponseValue};

/// Exit status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Successful execution
    Success = 0,
    /// Validation, transport, parsing or API-reported failure
    Error = 2,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Classify the result code the API embedded in its response body.
    ///
    /// Only an exact `200` counts as success. Client and server error
    /// classes (`4xx`, `5xx`) fail, and so does anything unrecognized.
    pub fn from_api_code(code: Option<&str>) -> Self {
        match code {
            Some("200") => ExitStatus::Success,
            Some(c) if c.starts_with('4') || c.starts_with('5') => ExitStatus::Error,
            _ => ExitStatus::Error,
        }
    }

    /// Exit status for a parsed response record, based on its `code` entry
    pub fn from_record(record: &ResponseRecord) -> Self {
        let code = match record.get("code") {
            Some(ResponseValue::Flat(code)) => Some(code.as_str()),
            _ => None,
        };
        Self::from_api_code(code)
    }
}
