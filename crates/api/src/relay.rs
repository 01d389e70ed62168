//! Proxy relay client for `GET /api/download`.
//!
//! Fetches a direct media URL with the browser header table from
//! [`vidgrab_core::relay`], buffers the whole body in memory and hands it
//! back for re-emission as an attachment.

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use reqwest::header::{HeaderName, CONTENT_ENCODING, CONTENT_TYPE};
use url::Url;
use vidgrab_core::error::CoreError;
use vidgrab_core::relay::{derive_filename, is_accepted_status, request_headers, DEFAULT_CONTENT_TYPE};

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct RelayedMedia {
    pub body: Bytes,
    pub content_type: String,
    /// Passed through so encoded bodies stay decodable downstream.
    pub content_encoding: Option<String>,
    pub filename: String,
}

/// HTTP client used to relay media downloads.
#[derive(Debug, Clone)]
pub struct ProxyRelay {
    client: reqwest::Client,
    max_bytes: Option<u64>,
}

impl ProxyRelay {
    /// Build a relay with a per-fetch timeout and an optional body cap.
    pub fn new(timeout: Duration, max_bytes: Option<u64>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, max_bytes))
    }

    /// Build a relay around an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, max_bytes: Option<u64>) -> Self {
        Self { client, max_bytes }
    }

    /// Fetch `target` and buffer the response.
    ///
    /// Upstream 200 and 206 are both success. Any other status is a
    /// [`CoreError::Fetch`] carrying the upstream body when it is valid
    /// UTF-8. Transport failures are [`CoreError::Network`].
    pub async fn fetch(&self, target: &Url) -> Result<RelayedMedia, CoreError> {
        let mut request = self.client.get(target.clone());
        for (name, value) in request_headers(target) {
            request = request.header(name, value);
        }

        let mut response = request.send().await.map_err(|e| network_error(target, e))?;
        let status = response.status().as_u16();
        tracing::info!(url = %target, status, "Got upstream response");

        if !is_accepted_status(status) {
            let message = match response.bytes().await {
                Ok(body) => match std::str::from_utf8(&body) {
                    Ok(text) if !text.trim().is_empty() => format!("Failed to fetch video: {text}"),
                    _ => format!("Failed to fetch video: HTTP {status}"),
                },
                Err(_) => format!("Failed to fetch video: HTTP {status}"),
            };
            tracing::error!(url = %target, status, error = %message, "Failed to fetch video");
            return Err(CoreError::Fetch(message));
        }

        if let (Some(limit), Some(declared)) = (self.max_bytes, response.content_length()) {
            if declared > limit {
                return Err(too_large(target, limit));
            }
        }

        let content_type = header_string(&response, CONTENT_TYPE)
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let content_encoding = header_string(&response, CONTENT_ENCODING);

        let mut buffer = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| network_error(target, e))? {
            buffer.extend_from_slice(&chunk);
            if let Some(limit) = self.max_bytes {
                if buffer.len() as u64 > limit {
                    return Err(too_large(target, limit));
                }
            }
        }

        let filename = derive_filename(target, chrono::Utc::now());
        tracing::info!(
            url = %target,
            bytes = buffer.len(),
            content_type = %content_type,
            filename = %filename,
            "Buffered upstream media",
        );

        Ok(RelayedMedia {
            body: buffer.freeze(),
            content_type,
            content_encoding,
            filename,
        })
    }
}

fn header_string(response: &reqwest::Response, name: HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn network_error(target: &Url, err: reqwest::Error) -> CoreError {
    tracing::error!(url = %target, error = %err, "Network error during download");
    CoreError::Network(err.to_string())
}

fn too_large(target: &Url, limit: u64) -> CoreError {
    tracing::warn!(url = %target, limit, "Upstream body exceeds relay limit");
    CoreError::Fetch(format!("Failed to fetch video: response exceeds {limit} bytes"))
}
