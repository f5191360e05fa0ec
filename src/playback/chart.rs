use crate::session::EmotionSegment;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const UNKNOWN_SPEAKER: &str = "Unknown Speaker";

/// One chart sample: the segment's end time and a percentage per emotion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub end_time: f64,

    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerSeries {
    pub speaker: String,
    pub points: Vec<ChartPoint>,
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Every emotion label across all segments, lowercased, deduplicated, sorted
pub fn emotion_labels(segments: &[EmotionSegment]) -> Vec<String> {
    segments
        .iter()
        .flat_map(|segment| segment.emotions.iter())
        .filter(|emotion| !emotion.label.is_empty())
        .map(|emotion| emotion.label.to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Per-speaker chart series, speakers in order of first appearance
pub fn chart_series(segments: &[EmotionSegment]) -> Vec<SpeakerSeries> {
    let mut series: Vec<SpeakerSeries> = Vec::new();

    for segment in segments {
        let speaker = if segment.speaker.is_empty() {
            UNKNOWN_SPEAKER
        } else {
            segment.speaker.as_str()
        };

        let point = ChartPoint {
            end_time: round2(segment.end_time),
            values: segment
                .emotions
                .iter()
                .map(|emotion| (emotion.label.to_lowercase(), round2(emotion.score * 100.0)))
                .collect(),
        };

        match series.iter_mut().find(|s| s.speaker == speaker) {
            Some(existing) => existing.points.push(point),
            None => series.push(SpeakerSeries {
                speaker: speaker.to_string(),
                points: vec![point],
            }),
        }
    }

    series
}

/// Speaker of the first segment whose `[start_time, end_time]` contains `current_time`
pub fn active_speaker(segments: &[EmotionSegment], current_time: f64) -> Option<&str> {
    segments
        .iter()
        .find(|segment| segment.contains(current_time))
        .map(|segment| segment.speaker.as_str())
        .filter(|speaker| !speaker.is_empty())
}
