//! Request URL builder

use crate::errors::Result;
use crate::input::ArgumentMap;

/// Encode parameters as a form-style query string (`a=1&b=x+y`)
pub fn build_query(args: &ArgumentMap) -> Result<String> {
    Ok(serde_urlencoded::to_string(args)?)
}

/// Endpoint, `?`, then the encoded parameters
pub fn build_url(endpoint: &str, args: &ArgumentMap) -> Result<String> {
    Ok(format!("{}?{}", endpoint, build_query(args)?))
}
