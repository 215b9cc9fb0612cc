//! udrcmd library interface
//!
//! Command line client for the united-domains Reselling API: collects
//! parameters, sends one GET request and decodes the plaintext response.
//!
//! # Module Organization
//!
//! - [`cli`] - Argument parsing and parameter collection
//! - [`config`] - Config file (endpoint and credentials)
//! - [`input`] - Argument map and `key=value` splitting
//! - [`request`] - Validation and URL building
//! - [`client`] - HTTP client and TLS trust preflight
//! - [`response`] - Response normalization and parsing
//! - [`output`] - Printing results
//! - [`errors`] - Error types (UdrError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Main execution logic

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod errors;
pub mod input;
pub mod logging;
pub mod output;
pub mod request;
pub mod response;
pub mod status;
