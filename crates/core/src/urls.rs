//! URL validation and origin helpers.
//!
//! Every endpoint that accepts a target URL runs it through [`validate_url`]
//! before touching the network.

use url::Url;

use crate::error::CoreError;

/// Message returned to clients for any URL that fails validation.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL provided";

/// Returns `true` iff `input` parses as an absolute URL with both a scheme
/// and a non-empty host.
///
/// Relative paths, bare hostnames, host-less URLs (`mailto:`, `file:///`)
/// and anything the parser rejects all return `false`.
pub fn is_valid_url(input: &str) -> bool {
    parse_absolute(input).is_some()
}

/// Parse and validate a target URL, returning the parsed form.
pub fn validate_url(input: &str) -> Result<Url, CoreError> {
    parse_absolute(input).ok_or_else(|| CoreError::Validation(INVALID_URL_MESSAGE.to_string()))
}

fn parse_absolute(input: &str) -> Option<Url> {
    let url = Url::parse(input).ok()?;
    let has_host = url.host_str().is_some_and(|h| !h.is_empty());
    (!url.scheme().is_empty() && has_host).then_some(url)
}

/// Render `scheme://host[:port]` for a parsed URL.
///
/// Credentials, path, query and fragment are dropped. Default ports are
/// omitted because the parser normalizes them away.
pub fn url_origin(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    }
}

/// Origin of a raw URL string, or an empty string if it does not parse.
pub fn origin_of(input: &str) -> String {
    Url::parse(input)
        .ok()
        .filter(|u| u.host_str().is_some())
        .map(|u| url_origin(&u))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
