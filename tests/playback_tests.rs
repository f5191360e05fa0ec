// Unit tests for playback synchronization and emotion chart shaping

use serde_json::json;
use session_lens::playback::{
    active_speaker, chart_series, emotion_labels, round2, EmotionFilter, EntryHighlighter,
    FixedDurationHighlighter, PlaybackView,
};
use session_lens::session::{EmotionScore, EmotionSegment, TranscriptEntry};

fn segment(speaker: &str, start: f64, end: f64, emotions: &[(&str, f64)]) -> EmotionSegment {
    EmotionSegment {
        speaker: speaker.to_string(),
        text: String::new(),
        start_time: start,
        end_time: end,
        emotions: emotions
            .iter()
            .map(|(label, score)| EmotionScore {
                label: label.to_string(),
                score: *score,
            })
            .collect(),
    }
}

fn entries(n: usize) -> Vec<TranscriptEntry> {
    (0..n)
        .map(|i| TranscriptEntry {
            speaker: format!("Speaker {}", i),
            text: format!("line {}", i),
        })
        .collect()
}

#[test]
fn test_fixed_duration_highlighting() {
    let highlighter = FixedDurationHighlighter::default();

    assert_eq!(highlighter.active_entry(0.0, 3), Some(0));
    assert_eq!(highlighter.active_entry(29.9, 3), Some(0));
    assert_eq!(highlighter.active_entry(45.0, 3), Some(1));
    assert_eq!(highlighter.active_entry(1000.0, 3), Some(2));
    assert_eq!(highlighter.active_entry(10.0, 0), None);
    assert_eq!(highlighter.active_entry(-1.0, 3), None);
    assert_eq!(highlighter.active_entry(f64::NAN, 3), None);
}

#[test]
fn test_custom_seconds_per_entry() {
    let highlighter = FixedDurationHighlighter::new(10.0);
    assert_eq!(highlighter.active_entry(25.0, 5), Some(2));

    let broken = FixedDurationHighlighter::new(0.0);
    assert_eq!(broken.active_entry(25.0, 5), None);
}

#[test]
fn test_active_speaker() {
    let segments = vec![segment("A", 0.0, 12.0, &[]), segment("B", 12.5, 20.0, &[])];

    assert_eq!(active_speaker(&segments, 10.0), Some("A"));
    assert_eq!(active_speaker(&segments, 0.0), Some("A"));
    assert_eq!(active_speaker(&segments, 12.0), Some("A"), "bounds are inclusive");
    assert_eq!(active_speaker(&segments, 12.2), None);
    assert_eq!(active_speaker(&segments, 20.0), Some("B"));
    assert_eq!(active_speaker(&[], 5.0), None);
}

#[test]
fn test_overlapping_segments_pick_first() {
    let segments = vec![segment("A", 0.0, 10.0, &[]), segment("B", 5.0, 15.0, &[])];
    assert_eq!(active_speaker(&segments, 7.0), Some("A"));
}

#[test]
fn test_labels_are_lowercased_and_deduplicated() {
    let segments = vec![
        segment("A", 0.0, 1.0, &[("Joy", 0.1), ("joy", 0.2)]),
        segment("B", 1.0, 2.0, &[("SAD", 0.3), ("", 0.4)]),
    ];

    assert_eq!(emotion_labels(&segments), vec!["joy", "sad"]);
}

#[test]
fn test_chart_point_rounding() {
    let series = chart_series(&[segment("A", 0.0, 5.004, &[("Joy", 0.1234)])]);

    let point = &series[0].points[0];
    assert_eq!(point.end_time, 5.0);
    assert_eq!(point.values.get("joy"), Some(&12.34));
    assert_eq!(round2(1.005_1), 1.01);
}

#[test]
fn test_chart_point_serializes_flat() {
    let series = chart_series(&[segment("A", 0.0, 2.5, &[("Joy", 0.5), ("Anger", 0.25)])]);
    let json = serde_json::to_value(&series[0].points[0]).unwrap();

    assert_eq!(json, json!({"end_time": 2.5, "joy": 50.0, "anger": 25.0}));
}

#[test]
fn test_series_grouped_by_speaker_in_first_appearance_order() {
    let series = chart_series(&[
        segment("B", 0.0, 1.0, &[("joy", 0.1)]),
        segment("A", 1.0, 2.0, &[("joy", 0.2)]),
        segment("B", 2.0, 3.0, &[("joy", 0.3)]),
        segment("", 3.0, 4.0, &[("joy", 0.4)]),
    ]);

    let speakers: Vec<&str> = series.iter().map(|s| s.speaker.as_str()).collect();
    assert_eq!(speakers, vec!["B", "A", "Unknown Speaker"]);
    assert_eq!(series[0].points.len(), 2);
    assert_eq!(series[0].points[1].end_time, 3.0);
}

#[test]
fn test_filter_restricts_points() {
    let series = chart_series(&[segment("A", 0.0, 1.0, &[("Joy", 0.5), ("Sad", 0.25)])]);
    let mut filter = EmotionFilter::new(vec!["joy".to_string(), "sad".to_string()]);

    assert_eq!(filter.apply(&series), series, "everything starts selected");

    filter.toggle("sad");
    assert!(!filter.is_selected("sad"));
    let filtered = filter.apply(&series);
    assert_eq!(filtered[0].points[0].values.len(), 1);
    assert_eq!(filtered[0].points[0].values.get("joy"), Some(&50.0));
    assert_eq!(filtered[0].points[0].end_time, 1.0);

    filter.deselect_all();
    let filtered = filter.apply(&series);
    assert!(filtered[0].points[0].values.is_empty());
    assert_eq!(filtered[0].points[0].end_time, 1.0);

    filter.select_all();
    assert_eq!(filter.apply(&series), series);
    assert_eq!(filter.selected(), vec!["joy", "sad"]);
}

#[test]
fn test_view_follows_playback_position() {
    let segments = vec![
        segment("Ana", 0.0, 30.0, &[("Joy", 0.9)]),
        segment("Ben", 30.0, 60.0, &[("Calm", 0.7)]),
    ];
    let mut view = PlaybackView::new(entries(3), segments);

    assert_eq!(view.active_entry(), Some(0));
    assert_eq!(view.active_speaker(), Some("Ana"));

    view.on_time_update(45.0);
    assert_eq!(view.current_time(), 45.0);
    assert_eq!(view.active_entry(), Some(1));
    assert_eq!(view.active_speaker(), Some("Ben"));

    assert_eq!(view.labels(), &["calm".to_string(), "joy".to_string()]);

    view.filter_mut().toggle("joy");
    let chart = view.chart();
    assert!(chart[0].points[0].values.is_empty());
    assert_eq!(chart[1].points[0].values.get("calm"), Some(&70.0));
    assert_eq!(view.series()[0].points[0].values.get("joy"), Some(&90.0));
}

struct EveryTenSeconds;

impl EntryHighlighter for EveryTenSeconds {
    fn active_entry(&self, current_time: f64, entry_count: usize) -> Option<usize> {
        let index = (current_time / 10.0) as usize;
        (index < entry_count).then_some(index)
    }
}

#[test]
fn test_view_accepts_custom_highlighter() {
    let mut view = PlaybackView::new(entries(3), Vec::new()).with_highlighter(EveryTenSeconds);

    view.on_time_update(25.0);
    assert_eq!(view.active_entry(), Some(2));

    view.on_time_update(35.0);
    assert_eq!(view.active_entry(), None);
}

#[test]
fn test_parse_transcript_document() {
    let document = r#"[
        {"speaker": "Ana", "text": "Hello"},
        {"speaker": 2, "text": "Hi"},
        {"speaker": "Ben"},
        {"text": "orphan"},
        {"speaker": "Cy", "text": 42}
    ]"#;

    let parsed = TranscriptEntry::parse_document(document);

    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[1].speaker, "Speaker 2");
    assert_eq!(parsed[2].text, "42");
}

#[test]
fn test_parse_transcript_rejects_non_array() {
    assert!(TranscriptEntry::parse_document(r#"{"speaker":"A","text":"B"}"#).is_empty());
    assert!(TranscriptEntry::parse_document("not json").is_empty());
}
