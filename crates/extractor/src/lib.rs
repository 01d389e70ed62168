//! Extraction engine integration.
//!
//! [`ExtractionEngine`] is the seam to the external page-scraping engine;
//! [`YtDlpEngine`] is the production implementation and
//! [`extract_videos`] turns an engine result into client-facing summaries.

pub mod adapter;
pub mod engine;
pub mod ytdlp;

pub use adapter::extract_videos;
pub use engine::{EngineError, ExtractionEngine};
pub use ytdlp::YtDlpEngine;
