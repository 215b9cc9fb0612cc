//! HTTP client functionality

pub mod http;
pub mod ssl;

// Re-exports
pub use http::{ApiClient, USER_AGENT_STRING};
