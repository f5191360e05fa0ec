//! Plain-text rendering of sessions for the terminal

use crate::playback::PlaybackView;
use crate::session::{
    format_date, format_duration, format_participants, ResourceState, ResourceStatus,
    SessionMetadata, SessionSnapshot,
};
use std::fmt::Write;

/// Per-section wording for each resource state
struct SectionText {
    not_started: &'static str,
    queued: &'static str,
    processing: &'static str,
    failed: &'static str,
    empty: &'static str,
}

const AUDIO: SectionText = SectionText {
    not_started: "Audio has not been uploaded yet.",
    queued: "Audio is queued for processing.",
    processing: "Audio is still being processed...",
    failed: "Failed to load audio file.",
    empty: "No audio available.",
};

const SUMMARY: SectionText = SectionText {
    not_started: "Summary has not been generated yet.",
    queued: "Summary is queued for generation.",
    processing: "Summary is still being generated...",
    failed: "Failed to load summary.",
    empty: "No summary available.",
};

const EMOTION: SectionText = SectionText {
    not_started: "Emotion analysis has not started.",
    queued: "Emotion analysis is queued.",
    processing: "Analyzing emotions...",
    failed: "Failed to load emotion data.",
    empty: "No emotion data available.",
};

const TRANSCRIPT: SectionText = SectionText {
    not_started: "Transcription has not started yet.",
    queued: "Transcription is queued.",
    processing: "Transcribing audio...",
    failed: "Could not load transcript.",
    empty: "No transcript available.",
};

/// Message for a section that has no content to show, or `None` if it does
fn placeholder<C>(state: &ResourceState<C>, text: &SectionText) -> Option<&'static str> {
    if state.error.is_some() {
        return Some(text.failed);
    }

    match state.status {
        None => Some("Loading..."),
        Some(ResourceStatus::NotStarted) => Some(text.not_started),
        Some(ResourceStatus::Queued) => Some(text.queued),
        Some(ResourceStatus::Processing) => Some(text.processing),
        Some(ResourceStatus::Failed | ResourceStatus::Unavailable) => Some(text.failed),
        Some(ResourceStatus::Completed) if state.content.is_none() => Some(text.empty),
        Some(ResourceStatus::Completed) => None,
    }
}

/// One line per session for `list`
pub fn render_session_list(sessions: &[SessionMetadata]) -> String {
    if sessions.is_empty() {
        return "No sessions yet.\n".to_string();
    }

    let mut out = String::new();
    for session in sessions {
        let _ = writeln!(
            out,
            "{}  {:<12} {}  ({}, {})",
            session.id,
            session.status.as_str(),
            session.title,
            format_date(&session.created_at),
            format_duration(session.duration)
        );
    }
    out
}

/// Full session detail at the view's current playback position
pub fn render_session(snapshot: &SessionSnapshot, view: &PlaybackView) -> String {
    let mut out = String::new();

    let metadata = match (&snapshot.metadata.content, snapshot.metadata.status) {
        (Some(metadata), Some(ResourceStatus::Completed)) => metadata,
        (_, None | Some(ResourceStatus::Queued | ResourceStatus::Processing))
            if snapshot.metadata.error.is_none() =>
        {
            let _ = writeln!(out, "Session {} is still loading...", snapshot.session_id);
            return out;
        }
        _ => {
            let _ = writeln!(out, "Session not found");
            let _ = writeln!(out, "The session doesn't exist or you don't have access.");
            return out;
        }
    };

    let _ = writeln!(out, "# {}", metadata.title);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Audio Playback");
    match placeholder(&snapshot.audio, &AUDIO) {
        Some(message) => {
            let _ = writeln!(out, "{}", message);
        }
        None => {
            let url = snapshot.audio.content.as_deref().unwrap_or_default();
            let _ = writeln!(out, "{}", url);
            let _ = writeln!(
                out,
                "Position: {:.1}s of {}",
                view.current_time(),
                format_duration(metadata.duration)
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Session Summary");
    let summary: Option<&str> = placeholder(&snapshot.summary, &SUMMARY);
    let summary = summary.or(snapshot.summary.content.as_deref()).unwrap_or_default();
    let _ = writeln!(out, "{}", summary.trim_end());
    let _ = writeln!(out);

    let _ = writeln!(out, "## Emotional Analysis");
    match placeholder(&snapshot.emotion, &EMOTION) {
        Some(message) => {
            let _ = writeln!(out, "{}", message);
        }
        None if view.labels().is_empty() => {
            let _ = writeln!(out, "{}", EMOTION.empty);
        }
        None => render_emotions(&mut out, view),
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Transcript");
    match placeholder(&snapshot.transcript, &TRANSCRIPT) {
        Some(message) => {
            let _ = writeln!(out, "{}", message);
        }
        None if view.transcript().is_empty() => {
            let _ = writeln!(out, "{}", TRANSCRIPT.empty);
        }
        None => {
            let active = view.active_entry();
            for (index, entry) in view.transcript().iter().enumerate() {
                let marker = if Some(index) == active { ">" } else { " " };
                let _ = writeln!(out, "{} {}: {}", marker, entry.speaker, entry.text);
            }
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Session Details");
    let _ = writeln!(out, "Date:         {}", format_date(&metadata.created_at));
    let _ = writeln!(out, "Duration:     {}", format_duration(metadata.duration));
    let _ = writeln!(
        out,
        "Participants: {}",
        format_participants(metadata.participants.as_deref())
    );

    out
}

fn render_emotions(out: &mut String, view: &PlaybackView) {
    let selected = view.filter().selected();
    let _ = writeln!(out, "Emotions: {}", selected.join(", "));

    let active = view.active_speaker();
    for series in view.chart() {
        let marker = if active == Some(series.speaker.as_str()) {
            " (speaking)"
        } else {
            ""
        };
        let _ = writeln!(out, "Speaker {} - Emotional Analysis{}", series.speaker, marker);

        for point in &series.points {
            let values: Vec<String> = point
                .values
                .iter()
                .map(|(label, value)| format!("{} {:.2}%", label, value))
                .collect();
            let _ = writeln!(out, "  {:>8.2}s  {}", point.end_time, values.join("  "));
        }
    }
}
