use chrono::DateTime;

/// `"1h 2m 3s"` style duration; zero parts are left out
pub fn format_duration(seconds: Option<f64>) -> String {
    let seconds = match seconds {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => return "Unknown duration".to_string(),
    };

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }

    parts.join(" ")
}

/// `"January 5, 2025"`; input that is not RFC 3339 is returned unchanged
pub fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn format_participants(participants: Option<&[String]>) -> String {
    match participants {
        Some(list) if !list.is_empty() => list.join(", "),
        _ => "No participants listed".to_string(),
    }
}
