//! Request building module
//!
//! Checks the collected parameters and turns them into the API call URL.

mod builder;

pub use builder::{build_query, build_url};

use crate::errors::{Result, UdrError};
use crate::input::{ArgumentMap, COMMAND_KEY, LOGIN_KEY, PASSWORD_KEY};

/// Parameters every API call needs, with the name used in error messages
const REQUIRED: &[(&str, &str)] = &[
    (LOGIN_KEY, "Username"),
    (PASSWORD_KEY, "Password"),
    (COMMAND_KEY, "Command"),
];

/// Fail with [`UdrError::MissingField`] for the first required parameter
/// that was never supplied. Empty values count as supplied.
pub fn validate(args: &ArgumentMap) -> Result<()> {
    for (key, label) in REQUIRED {
        if !args.contains_key(key) {
            return Err(UdrError::MissingField(*label));
        }
    }
    Ok(())
}
