//! HTTP client for the reseller API
//!
//! One blocking client, one TLS preflight, one GET.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use super::ssl;
use crate::errors::{Result, UdrError};
use crate::input::ArgumentMap;
use crate::request::build_url;

/// User-Agent header value
pub const USER_AGENT_STRING: &str = concat!("udrcmd/", env!("CARGO_PKG_VERSION"));

/// Overall timeout for each request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client bound to one API endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: Url,
}

impl ApiClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self {
            client: build_client()?,
            endpoint,
        })
    }

    /// Run the TLS preflight against the endpoint's origin
    pub fn verify_trust(&self) -> Result<()> {
        let origin = ssl::origin_url(&self.endpoint)?;
        ssl::preflight(&self.client, &origin)
    }

    /// Send one API call and return the response body as text.
    ///
    /// The HTTP status is not checked; the API reports its result inside the
    /// body.
    pub fn call(&self, args: &ArgumentMap) -> Result<String> {
        let url = build_url(self.endpoint.as_str(), args)?;
        tracing::info!(endpoint = %self.endpoint, params = args.len(), "Sending API request");

        let response = self.client.get(&url).send().map_err(|e| {
            if ssl::is_trust_error(&e) {
                UdrError::TransportTrustFailure(e.to_string())
            } else {
                UdrError::Transport(e)
            }
        })?;

        let status = response.status();
        let bytes = response.bytes()?;
        tracing::debug!(status = %status, bytes = bytes.len(), "Received API response");

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Build the HTTP client. Certificate verification stays on.
fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT_STRING)
        .timeout(REQUEST_TIMEOUT)
        .referer(false)
        .build()
        .map_err(UdrError::Transport)
}
