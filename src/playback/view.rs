use super::chart::{active_speaker, chart_series, emotion_labels, SpeakerSeries};
use super::filter::EmotionFilter;
use super::highlight::{EntryHighlighter, FixedDurationHighlighter};
use crate::session::{EmotionSegment, TranscriptEntry};

/// View model of the session detail screen during playback
///
/// Owned by whoever renders it; `on_time_update` is fed from the player.
pub struct PlaybackView {
    transcript: Vec<TranscriptEntry>,
    segments: Vec<EmotionSegment>,
    series: Vec<SpeakerSeries>,
    filter: EmotionFilter,
    highlighter: Box<dyn EntryHighlighter>,
    current_time: f64,
}

impl PlaybackView {
    pub fn new(transcript: Vec<TranscriptEntry>, segments: Vec<EmotionSegment>) -> Self {
        let series = chart_series(&segments);
        let filter = EmotionFilter::new(emotion_labels(&segments));

        Self {
            transcript,
            segments,
            series,
            filter,
            highlighter: Box::new(FixedDurationHighlighter::default()),
            current_time: 0.0,
        }
    }

    pub fn with_highlighter(mut self, highlighter: impl EntryHighlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    pub fn on_time_update(&mut self, current_time: f64) {
        self.current_time = current_time;
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn segments(&self) -> &[EmotionSegment] {
        &self.segments
    }

    pub fn active_entry(&self) -> Option<usize> {
        self.highlighter.active_entry(self.current_time, self.transcript.len())
    }

    pub fn active_speaker(&self) -> Option<&str> {
        active_speaker(&self.segments, self.current_time)
    }

    /// All emotion labels present in the session
    pub fn labels(&self) -> &[String] {
        self.filter.available()
    }

    pub fn filter(&self) -> &EmotionFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut EmotionFilter {
        &mut self.filter
    }

    /// Unfiltered per-speaker series
    pub fn series(&self) -> &[SpeakerSeries] {
        &self.series
    }

    /// Per-speaker series restricted to the selected labels
    pub fn chart(&self) -> Vec<SpeakerSeries> {
        self.filter.apply(&self.series)
    }
}
