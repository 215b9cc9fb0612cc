//! SSL/TLS trust checks
//!
//! Before any API call the endpoint's origin is fetched once. If the TLS
//! handshake or certificate verification fails there, the run stops with
//! [`UdrError::TransportTrustFailure`] and no parameters (credentials
//! included) ever leave the machine.
//!
//! Certificates are always verified against the system roots; there is no
//! switch to turn verification off.

use std::error::Error as StdError;

use reqwest::blocking::Client;
use url::Url;

use crate::errors::{Result, UdrError};

/// Fragments of TLS failure messages, for errors that do not expose a
/// `rustls::Error` in their source chain
const TRUST_ERROR_HINTS: &[&str] = &["certificate", "tls", "ssl", "handshake"];

/// Origin of an endpoint (`https://host[:port]/`), the target of the preflight
pub fn origin_url(endpoint: &Url) -> Result<String> {
    match endpoint.scheme() {
        "http" | "https" => Ok(format!("{}/", endpoint.origin().ascii_serialization())),
        other => Err(UdrError::Config(format!(
            "Unsupported endpoint scheme '{}': expected http or https",
            other
        ))),
    }
}

/// Establish TLS trust with the endpoint's origin.
///
/// The response itself is discarded; any HTTP status is fine. TLS failures
/// become [`UdrError::TransportTrustFailure`], other transport failures are
/// reported as they are.
pub fn preflight(client: &Client, origin: &str) -> Result<()> {
    tracing::debug!(origin = %origin, "TLS preflight");

    match client.get(origin).send() {
        Ok(response) => {
            tracing::debug!(status = %response.status(), "TLS preflight completed");
            Ok(())
        }
        Err(e) if is_trust_error(&e) => {
            tracing::warn!(error = %e, "TLS verification failed");
            Err(UdrError::TransportTrustFailure(e.to_string()))
        }
        Err(e) => Err(UdrError::Transport(e)),
    }
}

/// Whether a request error was caused by TLS setup or certificate checks
pub fn is_trust_error(err: &reqwest::Error) -> bool {
    // The top-level message includes the URL, so only causes are inspected
    let mut current: Option<&(dyn StdError + 'static)> = err.source();

    while let Some(cause) = current {
        if is_rustls_error(cause) {
            return true;
        }
        let message = cause.to_string().to_lowercase();
        if TRUST_ERROR_HINTS.iter().any(|hint| message.contains(hint)) {
            return true;
        }
        current = cause.source();
    }

    false
}

fn is_rustls_error(err: &(dyn StdError + 'static)) -> bool {
    // hyper-util and tokio-rustls each wrap the handshake failure in an
    // io::Error, and io::Error::source() skips the payload of a custom error
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);

    while let Some(e) = current {
        if e.downcast_ref::<rustls::Error>().is_some() {
            return true;
        }
        current = e
            .downcast_ref::<std::io::Error>()
            .and_then(|io| io.get_ref())
            .map(|inner| inner as &(dyn StdError + 'static));
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_url() {
        let url = Url::parse("https://api.domainreselling.de/api/call.cgi").unwrap();
        assert_eq!(origin_url(&url).unwrap(), "https://api.domainreselling.de/");
    }

    #[test]
    fn test_origin_url_keeps_port() {
        let url = Url::parse("http://127.0.0.1:8080/api/call.cgi?x=1").unwrap();
        assert_eq!(origin_url(&url).unwrap(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_origin_url_rejects_other_schemes() {
        let url = Url::parse("ftp://example.test/api").unwrap();
        assert!(matches!(origin_url(&url), Err(UdrError::Config(_))));
    }

    #[test]
    fn test_rustls_error_detected_through_io_error() {
        let io = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            rustls::Error::General("bad record".to_string()),
        );
        assert!(is_rustls_error(&io));
    }

    #[test]
    fn test_rustls_error_detected_through_nested_io_errors() {
        // Shape of a handshake against a plain HTTP server
        let inner = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            rustls::Error::InvalidMessage(rustls::InvalidMessage::InvalidContentType),
        );
        let outer = std::io::Error::new(std::io::ErrorKind::Other, inner);
        assert!(is_rustls_error(&outer));
    }

    #[test]
    fn test_nested_plain_io_error_is_not_trust_error() {
        let inner = std::io::Error::from(std::io::ErrorKind::ConnectionReset);
        let outer = std::io::Error::new(std::io::ErrorKind::Other, inner);
        assert!(!is_rustls_error(&outer));
    }

    #[test]
    fn test_plain_io_error_is_not_trust_error() {
        let io = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        assert!(!is_rustls_error(&io));
    }
}
