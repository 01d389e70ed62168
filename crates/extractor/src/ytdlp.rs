//! yt-dlp subprocess engine.
//!
//! Runs `yt-dlp --dump-single-json` and returns its JSON document. Playlists
//! and multi-video pages come back as one record with an `entries` list.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;

use crate::engine::{EngineError, ExtractionEngine};

/// Binary name looked up on `PATH` when no explicit path is configured.
pub const DEFAULT_BINARY: &str = "yt-dlp";

/// Default wall-clock limit for one extraction.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Fixed engine options: quiet, full (non-flat) metadata, best format.
const ENGINE_ARGS: &[&str] = &[
    "--dump-single-json",
    "--quiet",
    "--no-warnings",
    "--no-progress",
    "--format",
    "best",
];

/// Extraction engine backed by the `yt-dlp` command-line tool.
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    binary: PathBuf,
    timeout: Duration,
}

impl Default for YtDlpEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY, DEFAULT_TIMEOUT)
    }
}

impl YtDlpEngine {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Arguments passed for a given target. The URL always follows `--` so
    /// it can never be read as an option.
    pub fn args_for(url: &str) -> Vec<&str> {
        let mut args = ENGINE_ARGS.to_vec();
        args.push("--");
        args.push(url);
        args
    }
}

#[async_trait]
impl ExtractionEngine for YtDlpEngine {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract_info(&self, url: &str) -> Result<serde_json::Value, EngineError> {
        tracing::debug!(binary = %self.binary.display(), url, "Invoking yt-dlp");

        let run = tokio::process::Command::new(&self.binary)
            .args(Self::args_for(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, run).await {
            Ok(result) => result.map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    EngineError::NotFound(e)
                }
                _ => EngineError::Io(e),
            })?,
            Err(_) => {
                return Err(EngineError::Timeout {
                    secs: self.timeout.as_secs(),
                })
            }
        };

        if !output.status.success() {
            return Err(EngineError::Rejected {
                exit_code: output.status.code(),
                message: failure_message(&output.stderr, output.status.code()),
            });
        }

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            EngineError::Parse(format!(
                "{e}: {}",
                String::from_utf8_lossy(&output.stdout).trim()
            ))
        })?;

        if !value.is_object() {
            return Err(EngineError::Parse(format!(
                "expected a JSON object, got: {value}"
            )));
        }

        Ok(value)
    }
}

/// Human-readable failure message from the engine's stderr.
///
/// yt-dlp prefixes fatal errors with `ERROR:`; when such lines exist only
/// they are kept, otherwise the whole trimmed stderr is used.
fn failure_message(stderr: &[u8], exit_code: Option<i32>) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let errors: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("ERROR:"))
        .collect();

    if !errors.is_empty() {
        return errors.join("\n");
    }

    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        match exit_code {
            Some(code) => format!("yt-dlp exited with status {code}"),
            None => "yt-dlp was terminated by a signal".to_string(),
        }
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
