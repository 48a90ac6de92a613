use serde::{Deserialize, Serialize};

/// One line of recognized speech, timed against the start of the video.
///
/// Formats as `text (start - end)` for display, e.g. `hello (0:00:00 - 0:00:01)`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptLine {
    pub text: String,

    /// `H:MM:SS` offset as reported by the service.
    #[serde(rename = "startTime")]
    pub start_time: String,

    #[serde(rename = "endTime")]
    pub end_time: String,
}

impl std::fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} - {})", self.text, self.start_time, self.end_time)
    }
}

/// The analysis artifacts computed for one video. The service produces many
/// more insight kinds (faces, keywords, sentiments); only the transcript is
/// modeled here, the rest stays available under [`VideoIndex::raw`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Insights {
    #[serde(default)]
    pub transcript: Vec<TranscriptLine>,
}

/// Per-video section of an index payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexedVideo {
    #[serde(default, rename = "durationInSeconds")]
    pub duration_in_seconds: u64,

    #[serde(default)]
    pub insights: Insights,
}

/// Returned by `upload`. The `id` is the handle for all later index queries.
#[derive(Debug, Clone)]
pub struct Video {
    pub id: String,
    /// Processing state at upload time, typically `Uploaded` or `Processing`.
    pub state: String,
    /// Display name the video was uploaded under.
    pub name: String,
    /// Full API response JSON.
    pub raw: serde_json::Value,
}

/// Current index of a video: its processing state and, once processed, the
/// per-video insights. Check `state` or use the `is_*` helpers.
#[derive(Debug, Clone)]
pub struct VideoIndex {
    pub id: String,
    /// Remote-reported state. `Processed` and `Failed` are the only terminal
    /// values; anything else means the video is still being analyzed.
    pub state: String,
    pub videos: Vec<IndexedVideo>,
    /// Full API response JSON.
    pub raw: serde_json::Value,
}

impl VideoIndex {
    /// Terminal = the state won't change anymore (Processed or Failed).
    pub fn is_terminal(&self) -> bool {
        matches!(self.state.as_str(), "Processed" | "Failed")
    }

    /// State is Processed.
    pub fn is_processed(&self) -> bool {
        self.state == "Processed"
    }

    /// State is Failed.
    pub fn is_failed(&self) -> bool {
        self.state == "Failed"
    }

    /// Transcript of the first video in the payload, empty until processed.
    pub fn transcript(&self) -> &[TranscriptLine] {
        self.videos
            .first()
            .map(|v| v.insights.transcript.as_slice())
            .unwrap_or_default()
    }
}

/// Options for `upload`. The service defaults match the account the SDK was
/// written against: private videos transcribed in Cantonese.
pub struct UploadOptions {
    /// `Private` or `Public`. Default: `Private`.
    pub privacy: String,
    /// BCP-47 language tag for speech recognition. Default: `zh-HK`.
    pub language: String,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            privacy: "Private".to_string(),
            language: "zh-HK".to_string(),
        }
    }
}

/// Polling config for `wait_for_processing` / `index`.
pub struct PollOptions {
    /// Default: 10s.
    pub poll_interval: std::time::Duration,
    /// Default: 20 minutes.
    pub timeout: std::time::Duration,
    /// Called on each poll iteration with the current `VideoIndex`.
    #[allow(clippy::type_complexity)]
    pub on_progress: Option<Box<dyn Fn(&VideoIndex) + Send>>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            poll_interval: std::time::Duration::from_secs(10),
            timeout: std::time::Duration::from_secs(1200),
            on_progress: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal deserialization helpers (not part of the public API surface)
// ---------------------------------------------------------------------------

/// Pull a string out of a JSON value, or `""` if missing.
pub(crate) fn json_str(val: &serde_json::Value, key: &str) -> String {
    val.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Parse an upload response into a [`Video`].
pub(crate) fn video_from_value(val: serde_json::Value) -> Video {
    Video {
        id: json_str(&val, "id"),
        state: json_str(&val, "state"),
        name: json_str(&val, "name"),
        raw: val,
    }
}

/// Parse an index payload into a [`VideoIndex`].
pub(crate) fn index_from_value(val: serde_json::Value) -> VideoIndex {
    let videos: Vec<IndexedVideo> = val
        .get("videos")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    VideoIndex {
        id: json_str(&val, "id"),
        state: json_str(&val, "state"),
        videos,
        raw: val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn index_from_value_extracts_state_and_transcript() {
        let index = index_from_value(json!({
            "id": "vid-1",
            "state": "Processed",
            "videos": [{
                "durationInSeconds": 61,
                "insights": {
                    "transcript": [
                        {"text": "hello", "startTime": "0:00:00", "endTime": "0:00:01"},
                    ],
                },
            }],
        }));

        assert!(index.is_processed());
        assert!(index.is_terminal());
        assert_eq!(index.videos[0].duration_in_seconds, 61);
        assert_eq!(index.transcript().len(), 1);
        assert_eq!(index.transcript()[0].text, "hello");
    }

    #[test]
    fn index_from_value_tolerates_in_progress_payloads() {
        let index = index_from_value(json!({
            "id": "vid-2",
            "state": "Uploaded",
        }));

        assert!(!index.is_terminal());
        assert!(index.videos.is_empty());
        assert!(index.transcript().is_empty());
    }

    #[test]
    fn unknown_states_count_as_still_processing() {
        let index = index_from_value(json!({"id": "v", "state": "Quarantined"}));
        assert!(!index.is_processed());
        assert!(!index.is_failed());
        assert!(!index.is_terminal());
    }

    #[test]
    fn transcript_line_display_format() {
        let line = TranscriptLine {
            text: "hello".into(),
            start_time: "0:00:00".into(),
            end_time: "0:00:01".into(),
        };
        assert_eq!(line.to_string(), "hello (0:00:00 - 0:00:01)");
    }
}
