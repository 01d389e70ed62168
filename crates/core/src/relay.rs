//! Request shaping for the media proxy relay.
//!
//! The outbound header table, referer derivation, accepted upstream statuses
//! and attachment filename rules. The HTTP client itself lives in the API
//! crate.

use chrono::{DateTime, Utc};
use url::Url;

use crate::urls::url_origin;

/// Content type used when the upstream response does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Upstream statuses treated as a successful fetch (full and partial content).
pub const ACCEPTED_STATUSES: &[u16] = &[200, 206];

/// Fixed desktop-browser request headers sent on every relay fetch.
///
/// `Referer` is not listed here; it depends on the target and is appended
/// by [`request_headers`].
pub const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    ),
    ("Accept", "*/*"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Accept-Encoding", "gzip, deflate, br"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
    ("Sec-Fetch-Dest", "video"),
    ("Sec-Fetch-Mode", "no-cors"),
    ("Sec-Fetch-Site", "cross-site"),
    ("Sec-Fetch-User", "?1"),
    ("Cache-Control", "no-cache"),
    ("Pragma", "no-cache"),
    ("Range", "bytes=0-"),
];

/// Full outbound header list for `target`: the browser table plus a
/// `Referer` pointing at the target's own origin.
pub fn request_headers(target: &Url) -> Vec<(&'static str, String)> {
    BROWSER_HEADERS
        .iter()
        .map(|(name, value)| (*name, (*value).to_string()))
        .chain(std::iter::once(("Referer", url_origin(target))))
        .collect()
}

/// Whether an upstream status code counts as a successful fetch.
pub fn is_accepted_status(status: u16) -> bool {
    ACCEPTED_STATUSES.contains(&status)
}

/// Attachment filename for a relayed download.
///
/// Uses the last path segment when it contains a dot, otherwise
/// `video_<unix-seconds>.mp4`.
pub fn derive_filename(target: &Url, now: DateTime<Utc>) -> String {
    target
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| segment.contains('.'))
        .map(str::to_string)
        .unwrap_or_else(|| format!("video_{}.mp4", now.timestamp()))
}

/// `Content-Disposition` value for an attachment named `filename`.
pub fn content_disposition(filename: &str) -> String {
    format!("attachment; filename={filename}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
