//! Public origin extraction from HTTP request headers.
//!
//! Short URLs are built as `scheme://host/code`. When no public base URL is
//! configured the origin is derived from the request itself.

use crate::AppError;
use axum::http::{HeaderMap, header};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Extracts `scheme://host[:port]` from HTTP request headers.
///
/// - Host (including any port) comes from the `Host` header
/// - Scheme comes from the first `X-Forwarded-Proto` value, defaulting to `http`
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The `Host` header is missing or empty
/// - The header value contains invalid UTF-8
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// assert_eq!(request_origin(&headers).unwrap(), "http://sho.rt:8080");
/// ```
pub fn request_origin(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request(
            "Missing Host header",
            serde_json::json!({}),
        ));
    }

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "http" || v == "https")
        .unwrap_or_else(|| "http".to_string());

    Ok(format!("{}://{}", scheme, host))
}

/// Joins an origin (or configured base URL) and a short code.
pub fn short_url(base: &str, code: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    #[test]
    fn test_origin_simple() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));

        assert_eq!(request_origin(&headers).unwrap(), "http://example.com");
    }

    #[test]
    fn test_origin_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        assert_eq!(request_origin(&headers).unwrap(), "http://localhost:3000");
    }

    #[test]
    fn test_origin_ipv6() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("[::1]:8080"));

        assert_eq!(request_origin(&headers).unwrap(), "http://[::1]:8080");
    }

    #[test]
    fn test_origin_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sho.rt"));
        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("HTTPS, http"));

        assert_eq!(request_origin(&headers).unwrap(), "https://sho.rt");
    }

    #[test]
    fn test_origin_ignores_unknown_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sho.rt"));
        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("gopher"));

        assert_eq!(request_origin(&headers).unwrap(), "http://sho.rt");
    }

    #[test]
    fn test_origin_missing_host() {
        let headers = HeaderMap::new();

        let err = request_origin(&headers).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_short_url_joins_without_double_slash() {
        assert_eq!(short_url("https://sho.rt/", "promo"), "https://sho.rt/promo");
        assert_eq!(short_url("https://sho.rt", "promo"), "https://sho.rt/promo");
    }
}
