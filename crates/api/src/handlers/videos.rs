//! Handlers for video extraction and the download relay.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use vidgrab_core::relay::content_disposition;
use vidgrab_core::video::VideoSummary;

use crate::error::{AppError, AppResult};
use crate::query::TargetUrl;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /api/extract
// ---------------------------------------------------------------------------

/// Extract every playable video from a web page.
pub async fn extract_videos(
    State(state): State<AppState>,
    TargetUrl(url): TargetUrl,
) -> AppResult<Json<Vec<VideoSummary>>> {
    tracing::info!(url = %url, engine = state.engine.name(), "Extracting videos");
    let videos = vidgrab_extractor::extract_videos(state.engine.as_ref(), url.as_str()).await?;
    Ok(Json(videos))
}

// ---------------------------------------------------------------------------
// GET /api/download
// ---------------------------------------------------------------------------

/// Fetch a direct media URL and return it as a downloadable attachment.
pub async fn download_video(
    State(state): State<AppState>,
    TargetUrl(url): TargetUrl,
) -> AppResult<Response> {
    tracing::info!(url = %url, "Starting download");
    let media = state.relay.fetch(&url).await?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, header_value(&media.content_type)?);
    headers.insert(
        CONTENT_DISPOSITION,
        header_value(&content_disposition(&media.filename))?,
    );
    headers.insert(CONTENT_LENGTH, HeaderValue::from(media.body.len()));
    if let Some(encoding) = &media.content_encoding {
        headers.insert(CONTENT_ENCODING, header_value(encoding)?);
    }

    Ok((headers, Body::from(media.body)).into_response())
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::InternalError(format!("invalid response header value {value:?}: {e}")))
}
