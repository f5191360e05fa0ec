use super::envelope::ResourceStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Descriptive record of an uploaded session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub id: String,

    pub title: String,

    /// Overall processing state (`ready`/`error` map to completed/failed)
    pub status: ResourceStatus,

    #[serde(default)]
    pub summary: Option<String>,

    /// Recording length in seconds
    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(default)]
    pub participants: Option<Vec<String>>,

    /// RFC 3339 timestamps
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// One speaker turn of a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub text: String,
}

impl TranscriptEntry {
    /// Parse a transcript document (a JSON array of `{speaker, text}`)
    ///
    /// Entries missing either field are skipped. Numeric speakers become
    /// `"Speaker {n}"`. A document that is not a JSON array yields nothing.
    pub fn parse_document(document: &str) -> Vec<TranscriptEntry> {
        let parsed: Value = match serde_json::from_str(document) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse transcript JSON: {}", e);
                return Vec::new();
            }
        };

        let Value::Array(items) = parsed else {
            warn!("Transcript document is not a JSON array");
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| {
                let speaker = item.get("speaker")?;
                let text = item.get("text")?;
                Some(TranscriptEntry {
                    speaker: speaker_label(speaker),
                    text: plain_text(text),
                })
            })
            .collect()
    }
}

fn speaker_label(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => format!("Speaker {}", i),
            None => format!("Speaker {}", n),
        },
        other => plain_text(other),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A single emotion score within a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,

    /// Confidence between 0.0 and 1.0
    pub score: f64,
}

/// Time-bounded utterance with its emotion scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSegment {
    #[serde(default)]
    pub speaker: String,

    #[serde(default)]
    pub text: String,

    /// Seconds from the start of the recording
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub end_time: f64,

    #[serde(default)]
    pub emotions: Vec<EmotionScore>,
}

impl EmotionSegment {
    /// Whether `time` falls within `[start_time, end_time]`
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }
}

/// Response to a successful upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub session_id: String,
}

/// Response to single and bulk deletes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkDeleteRequest<'a> {
    pub session_ids: &'a [String],
}
