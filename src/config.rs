//! Config file handling
//!
//! The config file is a small JSON document next to the working directory:
//!
//! ```json
//! {
//!     "url": "https://api.domainreselling.de/api/call.cgi",
//!     "s_login": "reseller",
//!     "s_pw": "secret"
//! }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{Result, UdrError};
use crate::input::ArgumentMap;

/// Default config file name, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = "udrcmd.cfg";

/// Default API endpoint
pub const DEFAULT_URL: &str = "https://api.domainreselling.de/api/call.cgi";

/// Contents of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Endpoint override
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub s_login: Option<String>,
    #[serde(default)]
    pub s_pw: Option<String>,
}

impl Config {
    /// Load the config file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(UdrError::config_not_found(path.display().to_string()));
            }
            Err(e) => {
                return Err(UdrError::Config(format!(
                    "Failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let config = Self::from_json(&content)
            .map_err(|e| UdrError::Config(format!("Invalid config '{}': {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), has_url = config.url.is_some(), "Loaded config");
        Ok(config)
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Endpoint to call: explicit override, then config, then the default
    pub fn endpoint(&self, url_override: Option<&str>) -> String {
        url_override
            .or(self.url.as_deref())
            .unwrap_or(DEFAULT_URL)
            .to_string()
    }

    /// Seed an argument map with the configured credentials.
    ///
    /// Credentials only apply as a pair; a lone login or password is ignored.
    pub fn apply_credentials(&self, args: &mut ArgumentMap) {
        if let (Some(login), Some(pw)) = (&self.s_login, &self.s_pw) {
            args.set_credentials(login.as_str(), pw.as_str());
        }
    }
}
