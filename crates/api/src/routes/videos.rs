//! Route definitions for extraction and download.
//!
//! Mounted by `api_routes()` under `/api`.

use axum::routing::get;
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

/// Video routes.
///
/// ```text
/// GET    /extract           -> extract_videos
/// GET    /download          -> download_video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract", get(videos::extract_videos))
        .route("/download", get(videos::download_video))
}
