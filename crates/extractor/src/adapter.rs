//! Extraction adapter: engine invocation, result shaping and error mapping.

use vidgrab_core::error::{CoreError, UNEXPECTED_ERROR_MESSAGE};
use vidgrab_core::video::{summarize, ExtractedInfo, VideoSummary};

use crate::engine::{EngineError, ExtractionEngine};

/// Extract every playable video from the page at `url`.
///
/// `url` must already have passed validation. Entries without a resolvable
/// media URL are dropped silently; the request fails only when the engine
/// itself fails.
pub async fn extract_videos(
    engine: &dyn ExtractionEngine,
    url: &str,
) -> Result<Vec<VideoSummary>, CoreError> {
    let raw = engine.extract_info(url).await.map_err(|err| {
        tracing::error!(engine = engine.name(), url, error = %err, "Error extracting videos");
        classify_engine_error(err)
    })?;

    let info = ExtractedInfo::from_value(raw).map_err(|err| {
        tracing::error!(engine = engine.name(), url, error = %err, "Unexpected engine record shape");
        CoreError::Internal(UNEXPECTED_ERROR_MESSAGE.to_string())
    })?;

    let videos = summarize(info);
    tracing::info!(url, count = videos.len(), "Extracted videos");
    Ok(videos)
}

/// Map an engine failure onto the domain taxonomy.
///
/// Failures the engine reports about the target become client-facing
/// extraction errors carrying the engine's message; everything else is an
/// internal error with a generic message.
pub fn classify_engine_error(err: EngineError) -> CoreError {
    match err {
        EngineError::Rejected { message, .. } => {
            CoreError::Extraction(format!("Could not extract videos: {message}"))
        }
        EngineError::Timeout { secs } => CoreError::Extraction(format!(
            "Could not extract videos: extraction timed out after {secs}s"
        )),
        EngineError::NotFound(_) | EngineError::Parse(_) | EngineError::Io(_) => {
            CoreError::Internal(UNEXPECTED_ERROR_MESSAGE.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;

    /// Engine that replays a canned result.
    struct CannedEngine(fn() -> Result<Value, EngineError>);

    #[async_trait]
    impl ExtractionEngine for CannedEngine {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn extract_info(&self, _url: &str) -> Result<Value, EngineError> {
            (self.0)()
        }
    }

    #[tokio::test]
    async fn single_video_is_summarized() {
        let engine = CannedEngine(|| {
            Ok(json!({
                "id": "v1",
                "title": "Clip",
                "url": "https://cdn.example.com/v1.mp4",
                "ext": "mp4"
            }))
        });

        let videos = extract_videos(&engine, "https://example.com/v1").await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "Clip");
        assert_eq!(videos[0].source, "https://cdn.example.com");
    }

    #[tokio::test]
    async fn unresolved_entry_is_dropped_from_collection() {
        let engine = CannedEngine(|| {
            Ok(json!({
                "id": "playlist",
                "entries": [
                    {"id": "removed", "title": "[Deleted video]"},
                    {"id": "ok", "url": "https://cdn.example.com/ok.mp4"}
                ]
            }))
        });

        let videos = extract_videos(&engine, "https://example.com/list").await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "ok");
    }

    #[tokio::test]
    async fn engine_rejection_is_extraction_error() {
        let engine = CannedEngine(|| {
            Err(EngineError::Rejected {
                exit_code: Some(1),
                message: "ERROR: Private video".into(),
            })
        });

        let err = extract_videos(&engine, "https://example.com").await.unwrap_err();
        assert_matches!(
            err,
            CoreError::Extraction(msg) if msg == "Could not extract videos: ERROR: Private video"
        );
    }

    #[tokio::test]
    async fn engine_timeout_is_extraction_error() {
        let engine = CannedEngine(|| Err(EngineError::Timeout { secs: 120 }));
        let err = extract_videos(&engine, "https://example.com").await.unwrap_err();
        assert_matches!(err, CoreError::Extraction(msg) if msg.contains("timed out after 120s"));
    }

    #[tokio::test]
    async fn malformed_record_is_internal_error() {
        let engine = CannedEngine(|| Ok(json!({"duration": "forever"})));
        let err = extract_videos(&engine, "https://example.com").await.unwrap_err();
        assert_matches!(err, CoreError::Internal(msg) if msg == UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn missing_binary_is_internal() {
        let err = EngineError::NotFound(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_matches!(classify_engine_error(err), CoreError::Internal(_));
    }

    #[test]
    fn parse_failure_does_not_leak_output() {
        let err = EngineError::Parse("secret stdout".into());
        assert_matches!(
            classify_engine_error(err),
            CoreError::Internal(msg) if !msg.contains("secret")
        );
    }
}
