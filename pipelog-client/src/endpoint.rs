//! Endpoint resolution
//!
//! Endpoints are configured either as full URLs or as bare `host:port`
//! pairs. Bare endpoints on port 443 are production endpoints and get TLS;
//! any other bare endpoint is treated as a plain-text development server.

use reqwest::Url;

use crate::error::{ClientError, Result};

/// Turn a configured endpoint into a base URL without a trailing slash
pub fn resolve_base_url(endpoint: &str) -> Result<String> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(ClientError::InvalidEndpoint(
            "endpoint cannot be empty".to_string(),
        ));
    }

    let candidate = if endpoint.contains("://") {
        endpoint.to_string()
    } else if endpoint.ends_with(":443") {
        format!("https://{}", endpoint)
    } else {
        format!("http://{}", endpoint)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidEndpoint(format!(
            "{}: unsupported scheme '{}'",
            endpoint,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ClientError::InvalidEndpoint(format!(
            "{}: missing host",
            endpoint
        )));
    }

    Ok(candidate.trim_end_matches('/').to_string())
}

/// Whether a resolved base URL uses TLS
pub fn uses_tls(base_url: &str) -> bool {
    base_url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_443_gets_tls() {
        let base = resolve_base_url("api.pipelog.dev:443").unwrap();
        assert_eq!(base, "https://api.pipelog.dev:443");
        assert!(uses_tls(&base));
    }

    #[test]
    fn test_other_ports_are_plain() {
        let base = resolve_base_url("localhost:8080").unwrap();
        assert_eq!(base, "http://localhost:8080");
        assert!(!uses_tls(&base));
    }

    #[test]
    fn test_explicit_scheme_is_kept() {
        assert_eq!(
            resolve_base_url("https://logs.internal:9443/").unwrap(),
            "https://logs.internal:9443"
        );
        assert_eq!(
            resolve_base_url(" http://127.0.0.1:3000/api ").unwrap(),
            "http://127.0.0.1:3000/api"
        );
    }

    #[test]
    fn test_rejects_unusable_endpoints() {
        assert!(matches!(
            resolve_base_url(""),
            Err(ClientError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            resolve_base_url("ftp://files.example.com"),
            Err(ClientError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            resolve_base_url("http://"),
            Err(ClientError::InvalidEndpoint(_))
        ));
    }
}
