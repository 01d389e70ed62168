//! Format ranking and human-readable file sizes.
//!
//! The extraction engine reports every candidate encoding of a video as a
//! [`FormatDescriptor`]. [`select_best_format`] picks the one the service
//! hands back as the playable URL.

use std::cmp::Ordering;

use serde::Deserialize;

/// Codec value the engine uses to mark an absent stream.
pub const CODEC_NONE: &str = "none";

/// Placeholder shown when the engine reports no size.
pub const UNKNOWN_SIZE: &str = "Unknown size";

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

/// One candidate encoding of a video as reported by the extraction engine.
///
/// A codec key missing from the record reads as [`CODEC_NONE`]. A key that
/// is present but `null` stays `None`, which counts as an unknown codec
/// rather than an absent stream.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatDescriptor {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "codec_none")]
    pub acodec: Option<String>,
    #[serde(default = "codec_none")]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub filesize: Option<f64>,
}

impl Default for FormatDescriptor {
    fn default() -> Self {
        Self {
            url: None,
            acodec: codec_none(),
            vcodec: codec_none(),
            height: None,
            filesize: None,
        }
    }
}

fn codec_none() -> Option<String> {
    Some(CODEC_NONE.to_string())
}

impl FormatDescriptor {
    /// Whether the format carries both an audio and a video stream.
    pub fn has_audio_and_video(&self) -> bool {
        has_codec(self.acodec.as_deref()) && has_codec(self.vcodec.as_deref())
    }

    fn rank(&self) -> FormatRank {
        FormatRank {
            combined: self.has_audio_and_video(),
            height: self.height.unwrap_or(0.0),
            filesize: self.filesize.unwrap_or(0.0),
        }
    }
}

/// Only an explicit `"none"` marks a missing stream.
fn has_codec(codec: Option<&str>) -> bool {
    codec != Some(CODEC_NONE)
}

/// Composite ranking key, compared field by field.
#[derive(Debug, Clone, Copy)]
struct FormatRank {
    combined: bool,
    height: f64,
    filesize: f64,
}

impl FormatRank {
    fn compare(&self, other: &Self) -> Ordering {
        self.combined
            .cmp(&other.combined)
            .then_with(|| self.height.total_cmp(&other.height))
            .then_with(|| self.filesize.total_cmp(&other.filesize))
    }
}

/// Pick the playable URL of the best-ranked format.
///
/// Formats with both audio and video rank above single-stream formats, then
/// taller formats above shorter ones, then larger files above smaller ones.
/// On a tie the earlier format wins. Returns `""` for an empty list or when
/// the winning format has no URL.
pub fn select_best_format(formats: &[FormatDescriptor]) -> &str {
    let mut best: Option<(&FormatDescriptor, FormatRank)> = None;

    for format in formats {
        let rank = format.rank();
        let better = match &best {
            None => true,
            Some((_, current)) => rank.compare(current) == Ordering::Greater,
        };
        if better {
            best = Some((format, rank));
        }
    }

    best.and_then(|(f, _)| f.url.as_deref()).unwrap_or_default()
}

/// Format a byte count as `"<value> <unit>"` with one decimal place.
///
/// Zero means the size is unknown.
pub fn format_filesize(bytes: u64) -> String {
    if bytes == 0 {
        return UNKNOWN_SIZE.to_string();
    }

    let mut size = bytes as f64;
    let last = SIZE_UNITS.len() - 1;
    for unit in &SIZE_UNITS[..last] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} {}", SIZE_UNITS[last])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn format(url: &str, acodec: &str, vcodec: &str, height: Option<f64>) -> FormatDescriptor {
        FormatDescriptor {
            url: Some(url.to_string()),
            acodec: Some(acodec.to_string()),
            vcodec: Some(vcodec.to_string()),
            height,
            filesize: None,
        }
    }

    // -- select_best_format --------------------------------------------------

    #[test]
    fn combined_codecs_outrank_resolution() {
        let formats = vec![
            format("https://cdn/480.mp4", "mp4a.40.2", "avc1.4d401e", Some(480.0)),
            format("https://cdn/1080.mp4", "none", "avc1.640028", Some(1080.0)),
        ];
        assert_eq!(select_best_format(&formats), "https://cdn/480.mp4");
    }

    #[test]
    fn empty_list_yields_empty_url() {
        assert_eq!(select_best_format(&[]), "");
    }

    #[test]
    fn taller_format_wins_among_combined() {
        let formats = vec![
            format("https://cdn/360.mp4", "opus", "vp9", Some(360.0)),
            format("https://cdn/720.mp4", "opus", "vp9", Some(720.0)),
            format("https://cdn/480.mp4", "opus", "vp9", Some(480.0)),
        ];
        assert_eq!(select_best_format(&formats), "https://cdn/720.mp4");
    }

    #[test]
    fn filesize_breaks_height_ties() {
        let mut small = format("https://cdn/small.mp4", "aac", "h264", Some(720.0));
        small.filesize = Some(1_000.0);
        let mut large = format("https://cdn/large.mp4", "aac", "h264", Some(720.0));
        large.filesize = Some(9_000.0);
        assert_eq!(select_best_format(&[small, large]), "https://cdn/large.mp4");
    }

    #[test]
    fn full_ties_keep_first_entry() {
        let formats = vec![
            format("https://cdn/first.mp4", "aac", "h264", Some(720.0)),
            format("https://cdn/second.mp4", "aac", "h264", Some(720.0)),
        ];
        assert_eq!(select_best_format(&formats), "https://cdn/first.mp4");
    }

    #[test]
    fn missing_height_counts_as_zero() {
        let formats = vec![
            format("https://cdn/unknown.mp4", "aac", "h264", None),
            format("https://cdn/240.mp4", "aac", "h264", Some(240.0)),
        ];
        assert_eq!(select_best_format(&formats), "https://cdn/240.mp4");
    }

    #[test]
    fn absent_codec_key_counts_as_none() {
        let json = serde_json::json!({
            "url": "https://cdn/noaudio.mp4",
            "vcodec": "h264",
            "height": 2160
        });
        let no_audio: FormatDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(no_audio.acodec.as_deref(), Some(CODEC_NONE));

        let combined = format("https://cdn/combined.mp4", "aac", "h264", Some(144.0));
        assert_eq!(select_best_format(&[no_audio, combined]), "https://cdn/combined.mp4");
    }

    #[test]
    fn null_codecs_count_as_present() {
        let formats: Vec<FormatDescriptor> = serde_json::from_value(serde_json::json!([
            {"url": "https://cdn/360-muxed.mp4", "acodec": "mp4a", "vcodec": "avc1", "height": 360},
            {"url": "https://cdn/1080-unknown.mp4", "acodec": null, "vcodec": null, "height": 1080}
        ]))
        .unwrap();
        assert_eq!(select_best_format(&formats), "https://cdn/1080-unknown.mp4");
    }

    #[test]
    fn default_descriptor_has_no_streams() {
        assert!(!FormatDescriptor::default().has_audio_and_video());
    }

    #[test]
    fn winner_without_url_yields_empty() {
        let formats = vec![FormatDescriptor {
            url: None,
            acodec: Some("aac".into()),
            vcodec: Some("h264".into()),
            height: Some(720.0),
            filesize: None,
        }];
        assert_eq!(select_best_format(&formats), "");
    }

    #[test]
    fn descriptor_deserializes_with_nulls() {
        let json = serde_json::json!({
            "url": "https://cdn/a.mp4",
            "acodec": null,
            "vcodec": "avc1",
            "height": 720,
            "filesize": null,
            "format_id": "22"
        });
        let parsed: FormatDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.height, Some(720.0));
        assert!(parsed.acodec.is_none());
        assert!(parsed.filesize.is_none());
        assert!(parsed.has_audio_and_video());
    }

    // -- format_filesize -----------------------------------------------------

    #[test]
    fn zero_is_unknown() {
        assert_eq!(format_filesize(0), UNKNOWN_SIZE);
    }

    #[test]
    fn bytes_stay_in_bytes() {
        assert_eq!(format_filesize(512), "512.0 B");
        assert_eq!(format_filesize(1023), "1023.0 B");
    }

    #[test]
    fn kilobytes() {
        assert_eq!(format_filesize(1024), "1.0 KB");
        assert_eq!(format_filesize(1536), "1.5 KB");
    }

    #[test]
    fn megabytes_and_gigabytes() {
        assert_eq!(format_filesize(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_filesize(1_073_741_824), "1.0 GB");
    }

    #[test]
    fn terabytes_cap_the_scale() {
        assert_eq!(format_filesize(1024_u64.pow(4)), "1.0 TB");
        assert_eq!(format_filesize(2048 * 1024_u64.pow(4)), "2048.0 TB");
    }
}
