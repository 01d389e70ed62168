//! Query extractors shared by the extract and download endpoints.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use url::Url;
use vidgrab_core::urls::validate_url;

use crate::error::AppError;

/// Detail returned when the request has no `url` parameter at all.
pub const MISSING_URL_MESSAGE: &str = "Query parameter 'url' is required";

/// Raw `?url=` query parameters.
#[derive(Debug, Deserialize)]
pub struct UrlParams {
    pub url: String,
}

/// A validated absolute target URL taken from the `url` query parameter.
///
/// Rejects with 400 when the parameter is missing or fails validation, so
/// handlers never see malformed input and no network call is attempted.
///
/// ```ignore
/// async fn handler(TargetUrl(url): TargetUrl) -> AppResult<Json<()>> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct TargetUrl(pub Url);

impl<S> FromRequestParts<S> for TargetUrl
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<UrlParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let reason = rejection.body_text();
                tracing::warn!(error = %reason, "Rejected query string");
                if has_url_param(parts.uri.query()) {
                    AppError::BadRequest(reason)
                } else {
                    AppError::BadRequest(MISSING_URL_MESSAGE.to_string())
                }
            })?;

        let url = validate_url(&params.url).map_err(|err| {
            tracing::warn!(url = %params.url, "Rejected invalid URL");
            AppError::Core(err)
        })?;

        Ok(Self(url))
    }
}

fn has_url_param(query: Option<&str>) -> bool {
    query.is_some_and(|q| url::form_urlencoded::parse(q.as_bytes()).any(|(key, _)| key == "url"))
}
