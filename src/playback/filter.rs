use super::chart::{ChartPoint, SpeakerSeries};
use std::collections::BTreeSet;

/// Selection of emotion labels shown in the charts
///
/// Starts with every available label selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionFilter {
    available: Vec<String>,
    selected: BTreeSet<String>,
}

impl EmotionFilter {
    pub fn new(available: Vec<String>) -> Self {
        let selected = available.iter().cloned().collect();
        Self {
            available,
            selected,
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Selected labels in sorted order
    pub fn selected(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.contains(label)
    }

    pub fn toggle(&mut self, label: &str) {
        if !self.selected.remove(label) {
            self.selected.insert(label.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.available.iter().cloned().collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Restrict every point to `end_time` plus the selected labels
    pub fn apply(&self, series: &[SpeakerSeries]) -> Vec<SpeakerSeries> {
        series
            .iter()
            .map(|s| SpeakerSeries {
                speaker: s.speaker.clone(),
                points: s
                    .points
                    .iter()
                    .map(|point| ChartPoint {
                        end_time: point.end_time,
                        values: point
                            .values
                            .iter()
                            .filter(|(label, _)| self.selected.contains(label.as_str()))
                            .map(|(label, value)| (label.clone(), *value))
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}
