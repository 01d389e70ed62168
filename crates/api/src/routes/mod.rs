pub mod health;
pub mod videos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /extract?url=      extract playable videos from a page (GET)
/// /download?url=     relay a direct media URL as an attachment (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(videos::router())
}
