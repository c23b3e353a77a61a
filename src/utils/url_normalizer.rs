//! URL normalization and validation utilities.
//!
//! Submitted addresses are stored as typed, except that a missing scheme is filled in
//! with `https://`. Validation runs on the normalized value and checks that it is an
//! absolute HTTP(S) URL with a host and no control characters.
//!
//! Stored values may contain non-ASCII text; [`redirect_location`] turns them into the
//! ASCII form required by the `Location` header.

use url::Url;

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Errors that can occur while validating a target URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain control characters")]
    ControlCharacter,
}

/// Ensures the URL carries an explicit `http://` or `https://` scheme.
///
/// # Rules
///
/// 1. Blank input is returned unchanged
/// 2. Input starting with `http://` or `https://` (any case) is returned unchanged
/// 3. Anything else gets `https://` prepended
///
/// The function is idempotent: `normalize_url(&normalize_url(x)) == normalize_url(x)`.
///
/// # Examples
///
/// ```
/// use link_shortener::utils::url_normalizer::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), "https://example.com");
/// assert_eq!(normalize_url("HTTP://example.com"), "HTTP://example.com");
/// assert_eq!(normalize_url(""), "");
/// ```
pub fn normalize_url(input: &str) -> String {
    if input.trim().is_empty() || has_http_scheme(input) {
        return input.to_string();
    }

    format!("{HTTPS_PREFIX}{input}")
}

fn has_http_scheme(input: &str) -> bool {
    [HTTP_PREFIX, HTTPS_PREFIX].iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Checks that a normalized URL is an absolute HTTP(S) address with a host.
///
/// # Errors
///
/// - [`UrlNormalizationError::Empty`] for blank input
/// - [`UrlNormalizationError::ControlCharacter`] for tabs, newlines and other control
///   characters, which the URL parser would otherwise drop silently
/// - [`UrlNormalizationError::InvalidFormat`] when the URL does not parse
/// - [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes
/// - [`UrlNormalizationError::MissingHost`] when no host is present
pub fn validate_target_url(normalized: &str) -> Result<(), UrlNormalizationError> {
    if normalized.trim().is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    if normalized.chars().any(char::is_control) {
        return Err(UrlNormalizationError::ControlCharacter);
    }

    let url =
        Url::parse(normalized).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlNormalizationError::MissingHost),
    }
}

/// Returns a value usable as a `Location` header.
///
/// Printable ASCII is returned unchanged. Anything else goes through the URL parser,
/// which punycodes the host and percent-encodes the path and query.
pub fn redirect_location(url: &str) -> String {
    if url.bytes().all(|b| b.is_ascii_graphic()) {
        return url.to_string();
    }

    match Url::parse(url) {
        Ok(parsed) => parsed.into(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored URL does not parse, redirecting to it as is");
            url.to_string()
        }
    }
}
