//! Engine info records and the client-facing `VideoSummary`.
//!
//! The extraction engine returns either one info record or a record with an
//! `entries` list (playlists, pages embedding several videos). Both shapes
//! are normalized into [`ExtractedInfo`] and then flattened into summaries
//! by [`summarize`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::formats::{format_filesize, select_best_format, FormatDescriptor};
use crate::urls::origin_of;

/// Title used when the engine reports none.
pub const DEFAULT_TITLE: &str = "Untitled Video";

/// Extension used when the engine reports none.
pub const DEFAULT_EXT: &str = "mp4";

// ---------------------------------------------------------------------------
// Engine-side records
// ---------------------------------------------------------------------------

/// The fields of an engine info record this service reads.
///
/// Unknown keys are ignored and `null` is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Direct media URL, present when the engine already resolved a format.
    pub url: Option<String>,
    pub formats: Option<Vec<FormatDescriptor>>,
    pub thumbnail: Option<String>,
    pub duration: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub ext: Option<String>,
    pub filesize: Option<f64>,
    pub filesize_approx: Option<f64>,
}

impl RawRecord {
    /// Resolve the playable URL: the record's own `url` if set, otherwise
    /// the best entry of its `formats`. Empty when neither yields one.
    pub fn playable_url(&self) -> String {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self
                .formats
                .as_deref()
                .map(select_best_format)
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Best known size in bytes, preferring the engine's approximation.
    fn size_bytes(&self) -> u64 {
        self.filesize_approx
            .or(self.filesize)
            .map(|b| b as u64)
            .unwrap_or(0)
    }

    fn resolution(&self) -> String {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w as u64 > 0 && h as u64 > 0 => {
                format!("{}x{}", w as u64, h as u64)
            }
            _ => String::new(),
        }
    }
}

/// Top-level engine result, discriminated by the presence of `entries`.
#[derive(Debug, Clone)]
pub enum ExtractedInfo {
    SingleVideo(RawRecord),
    /// `None` slots are entries the engine reported as null.
    Collection(Vec<Option<RawRecord>>),
}

impl ExtractedInfo {
    /// Classify and decode a raw engine JSON document.
    ///
    /// A document with a non-null `entries` field is a collection; anything
    /// else is decoded as a single record. Collection entries are decoded one
    /// at a time and an entry that does not decode is skipped, so only a
    /// malformed top-level document is an error.
    pub fn from_value(mut value: Value) -> Result<Self, serde_json::Error> {
        let entries = value
            .as_object_mut()
            .and_then(|obj| obj.remove("entries"))
            .filter(|e| !e.is_null());

        match entries {
            Some(entries) => {
                let entries: Vec<Value> = serde_json::from_value(entries)?;
                Ok(Self::Collection(
                    entries.into_iter().enumerate().map(decode_entry).collect(),
                ))
            }
            None => Ok(Self::SingleVideo(serde_json::from_value(value)?)),
        }
    }
}

fn decode_entry((index, entry): (usize, Value)) -> Option<RawRecord> {
    if entry.is_null() {
        return None;
    }
    match serde_json::from_value(entry) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::warn!(index, error = %err, "Skipping undecodable collection entry");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Client-facing summary
// ---------------------------------------------------------------------------

/// One playable video as returned by `GET /api/extract`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub duration: f64,
    pub resolution: String,
    pub format: String,
    pub file_size: String,
    pub source: String,
}

impl VideoSummary {
    /// Build a summary from an engine record, filling defaults for every
    /// missing field. The result may carry an empty `url`.
    pub fn from_record(record: RawRecord) -> Self {
        let url = record.playable_url();
        let source = if url.is_empty() {
            String::new()
        } else {
            origin_of(&url)
        };

        Self {
            resolution: record.resolution(),
            file_size: format_filesize(record.size_bytes()),
            format: record.ext.as_deref().unwrap_or(DEFAULT_EXT).to_uppercase(),
            id: record
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title: record.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            thumbnail: record.thumbnail.unwrap_or_default(),
            duration: record.duration.unwrap_or(0.0),
            url,
            source,
        }
    }
}

/// Flatten an engine result into summaries, dropping null entries and
/// entries without a playable URL.
pub fn summarize(info: ExtractedInfo) -> Vec<VideoSummary> {
    let records: Vec<RawRecord> = match info {
        ExtractedInfo::SingleVideo(record) => vec![record],
        ExtractedInfo::Collection(entries) => entries.into_iter().flatten().collect(),
    };

    records
        .into_iter()
        .map(VideoSummary::from_record)
        .filter(|summary| !summary.url.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
