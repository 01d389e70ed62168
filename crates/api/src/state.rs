use std::sync::Arc;

use vidgrab_extractor::ExtractionEngine;

use crate::relay::ProxyRelay;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// External extraction engine (yt-dlp in production).
    pub engine: Arc<dyn ExtractionEngine>,
    /// HTTP client for the download relay.
    pub relay: Arc<ProxyRelay>,
}
