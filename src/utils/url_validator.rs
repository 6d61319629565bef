//! Destination URL validation.
//!
//! Destinations are stored exactly as submitted; this module only decides
//! whether the input is an absolute URL.

use url::Url;

/// Reasons a destination URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Missing,

    #[error("Invalid URL format")]
    InvalidFormat(String),
}

/// Checks that `input` parses as an absolute URL.
///
/// Relative references (`/path`, `example.com`) have no scheme and fail to
/// parse, so they are rejected. Control characters are rejected before
/// parsing: the parser drops tabs and newlines silently, but the raw input is
/// what gets stored and later sent as a `Location` header.
///
/// # Errors
///
/// Returns [`UrlValidationError::Missing`] for empty or whitespace-only input.
/// Returns [`UrlValidationError::InvalidFormat`] when the input contains
/// control characters or parsing fails.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_destination("https://example.com/a?b=c").is_ok());
/// assert!(validate_destination("example.com").is_err());
/// ```
pub fn validate_destination(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Missing);
    }

    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "control characters are not allowed".to_string(),
        ));
    }

    Url::parse(input)
        .map(|_| ())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))
}
