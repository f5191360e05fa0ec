/// Seconds of audio each transcript entry is assumed to cover
pub const DEFAULT_SECONDS_PER_ENTRY: f64 = 30.0;

/// Picks the transcript entry to highlight for a playback position
pub trait EntryHighlighter: Send + Sync {
    fn active_entry(&self, current_time: f64, entry_count: usize) -> Option<usize>;
}

/// Assumes every entry covers the same fixed span of audio
///
/// Transcripts carry no per-entry timestamps, so this is an estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDurationHighlighter {
    pub seconds_per_entry: f64,
}

impl FixedDurationHighlighter {
    pub fn new(seconds_per_entry: f64) -> Self {
        Self { seconds_per_entry }
    }
}

impl Default for FixedDurationHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDS_PER_ENTRY)
    }
}

impl EntryHighlighter for FixedDurationHighlighter {
    fn active_entry(&self, current_time: f64, entry_count: usize) -> Option<usize> {
        if entry_count == 0
            || !current_time.is_finite()
            || current_time < 0.0
            || self.seconds_per_entry <= 0.0
        {
            return None;
        }

        let index = (current_time / self.seconds_per_entry).floor() as usize;
        Some(index.min(entry_count - 1))
    }
}
