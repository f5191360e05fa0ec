//! Playback-synchronized view model
//!
//! Joins the resolved transcript and emotion segments with the current audio
//! position:
//! - which transcript entry to highlight
//! - which speaker is talking
//! - per-speaker emotion chart series, filtered by the selected labels

mod chart;
mod filter;
mod highlight;
mod view;

pub use chart::{active_speaker, chart_series, emotion_labels, round2, ChartPoint, SpeakerSeries};
pub use filter::EmotionFilter;
pub use highlight::{EntryHighlighter, FixedDurationHighlighter, DEFAULT_SECONDS_PER_ENTRY};
pub use view::PlaybackView;
