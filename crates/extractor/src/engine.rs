//! The seam between the service and the external extraction engine.

use async_trait::async_trait;

/// Errors reported by an extraction engine invocation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine binary could not be spawned.
    #[error("extraction engine not found: {0}")]
    NotFound(std::io::Error),

    /// The engine ran and reported a failure (unsupported site, private or
    /// removed content, network failure during extraction).
    #[error("extraction engine failed (exit code {exit_code:?}): {message}")]
    Rejected {
        exit_code: Option<i32>,
        message: String,
    },

    #[error("extraction engine timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The engine's output was not a JSON info record.
    #[error("failed to parse extraction engine output: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An external component that turns a page URL into an info record.
///
/// Implementations return the engine's raw JSON document; shaping it into
/// summaries is the adapter's job.
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Extract full metadata for `url` without downloading any media.
    async fn extract_info(&self, url: &str) -> Result<serde_json::Value, EngineError>;
}
