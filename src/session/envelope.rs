use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// Processing state of a per-session resource
///
/// Lifecycle: `NotStarted -> Queued -> Processing -> {Completed | Failed}`.
/// `Unavailable` never comes from the server; it marks an envelope
/// synthesized when a request could not be made (no session id, no user).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ResourceStatus {
    NotStarted,
    Queued,
    Processing,
    Completed,
    Failed,
    Unavailable,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::NotStarted => "not_started",
            ResourceStatus::Queued => "queued",
            ResourceStatus::Processing => "processing",
            ResourceStatus::Completed => "completed",
            ResourceStatus::Failed => "failed",
            ResourceStatus::Unavailable => "Error",
        }
    }

    /// Polling runs only in this state
    pub fn is_processing(&self) -> bool {
        matches!(self, ResourceStatus::Processing)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ResourceStatus::Completed)
    }

    /// Failed on the server, or could not be requested at all
    pub fn is_error(&self) -> bool {
        matches!(self, ResourceStatus::Failed | ResourceStatus::Unavailable)
    }

    /// No further transition is expected without user action
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ResourceStatus::Completed | ResourceStatus::Failed | ResourceStatus::Unavailable
        )
    }

    /// Whether `next` follows this state in the normal lifecycle
    pub fn can_transition_to(&self, next: ResourceStatus) -> bool {
        use ResourceStatus::*;

        if *self == next {
            return true;
        }

        match (self, next) {
            (_, Unavailable) | (Unavailable, _) => true,
            (NotStarted, Queued | Processing | Completed | Failed) => true,
            (Queued, Processing | Completed | Failed) => true,
            (Processing, Completed | Failed) => true,
            _ => false,
        }
    }
}

impl From<String> for ResourceStatus {
    fn from(value: String) -> Self {
        ResourceStatus::from(value.as_str())
    }
}

impl From<&str> for ResourceStatus {
    /// `ready` and `error` are the metadata lifecycle's names for
    /// `completed` and `failed`. Unknown values are treated as unavailable.
    fn from(value: &str) -> Self {
        match value {
            "not_started" => ResourceStatus::NotStarted,
            "queued" => ResourceStatus::Queued,
            "processing" => ResourceStatus::Processing,
            "completed" | "ready" => ResourceStatus::Completed,
            "failed" | "error" => ResourceStatus::Failed,
            _ => ResourceStatus::Unavailable,
        }
    }
}

impl Serialize for ResourceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{status, data}` wrapper returned by every per-session endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: ResourceStatus,

    /// Inline content or a URL to it; only present once completed
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn new(status: ResourceStatus, data: Option<T>) -> Self {
        Self { status, data }
    }

    /// Sentinel returned when preconditions for a request are not met
    pub fn unavailable() -> Self {
        Self::new(ResourceStatus::Unavailable, None)
    }

    pub fn completed(data: T) -> Self {
        Self::new(ResourceStatus::Completed, Some(data))
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Drop data attached to any status other than `completed`
    pub fn normalized(mut self) -> Self {
        if self.data.is_some() && !self.status.is_completed() {
            warn!("Discarding data attached to '{}' envelope", self.status);
            self.data = None;
        }
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            status: self.status,
            data: self.data.map(f),
        }
    }
}
