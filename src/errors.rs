//! Error types for udrcmd

use thiserror::Error;

/// Main error type for udrcmd
///
/// Every failure in the pipeline ends up here and is reported by the single
/// handler in [`crate::core::run`], which also picks the exit status.
#[derive(Error, Debug)]
pub enum UdrError {
    #[error("Could not find config file.")]
    ConfigNotFound { path: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Could not verify SSL. Exiting...")]
    TransportTrustFailure(String),

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Query encoding error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("Problem while trying to parse key-value input: {0}")]
    MalformedArgument(String),

    #[error("{0} missing.")]
    MissingField(&'static str),

    #[error("Invalid options: {0}")]
    OptionSyntax(#[from] clap::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Exiting...")]
    UserInterrupt,
}

impl UdrError {
    pub fn malformed(text: &str) -> Self {
        UdrError::MalformedArgument(text.trim_end().to_string())
    }

    pub fn config_not_found(path: impl Into<String>) -> Self {
        UdrError::ConfigNotFound { path: path.into() }
    }
}

pub type Result<T> = std::result::Result<T, UdrError>;
