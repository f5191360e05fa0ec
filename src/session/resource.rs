use super::models::{EmotionSegment, SessionMetadata, TranscriptEntry};
use crate::resolve::{is_pointer, ContentResolver, ResolveError};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// The five independently processed resources of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Metadata,
    Summary,
    Transcript,
    Emotion,
    Audio,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Metadata,
        ResourceKind::Summary,
        ResourceKind::Transcript,
        ResourceKind::Emotion,
        ResourceKind::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Metadata => "metadata",
            ResourceKind::Summary => "summary",
            ResourceKind::Transcript => "transcript",
            ResourceKind::Emotion => "emotion",
            ResourceKind::Audio => "audio",
        }
    }

    /// API path of this resource for one session
    pub fn path(&self, session_id: &str) -> String {
        let segment = match self {
            ResourceKind::Emotion => "emotions",
            other => other.as_str(),
        };
        format!("/api/sessions/{}/{}", segment, session_id)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a completed envelope's data into displayable content
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Content: Clone + fmt::Debug + Send + Sync + 'static;

    fn kind(&self) -> ResourceKind;

    /// Decode inline data or fetch the content it points to
    async fn materialize(
        &self,
        resolver: &ContentResolver,
        data: Value,
    ) -> Result<Option<Self::Content>, ResolveError>;
}

fn pointer(data: Value) -> Result<String, ResolveError> {
    match data {
        Value::String(url) => Ok(url),
        other => Err(ResolveError::InvalidPointer(other.to_string())),
    }
}

/// Inline session record
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataResource;

#[async_trait]
impl Resource for MetadataResource {
    type Content = SessionMetadata;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Metadata
    }

    async fn materialize(
        &self,
        _resolver: &ContentResolver,
        data: Value,
    ) -> Result<Option<SessionMetadata>, ResolveError> {
        serde_json::from_value(data)
            .map(Some)
            .map_err(|e| ResolveError::Decode(e.to_string()))
    }
}

/// Markdown summary, inline or behind a URL
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryResource;

#[async_trait]
impl Resource for SummaryResource {
    type Content = String;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Summary
    }

    async fn materialize(
        &self,
        resolver: &ContentResolver,
        data: Value,
    ) -> Result<Option<String>, ResolveError> {
        let data = pointer(data)?;
        if is_pointer(&data) {
            resolver.fetch_text(&data).await.map(Some)
        } else {
            Ok(Some(data))
        }
    }
}

/// Speaker-labelled transcript behind a URL
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptResource;

#[async_trait]
impl Resource for TranscriptResource {
    type Content = Vec<TranscriptEntry>;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Transcript
    }

    async fn materialize(
        &self,
        resolver: &ContentResolver,
        data: Value,
    ) -> Result<Option<Vec<TranscriptEntry>>, ResolveError> {
        let url = pointer(data)?;
        let document = resolver.fetch_text(&url).await?;
        Ok(Some(TranscriptEntry::parse_document(&document)))
    }
}

/// Emotion segments behind a URL
#[derive(Debug, Clone, Copy, Default)]
pub struct EmotionResource;

#[async_trait]
impl Resource for EmotionResource {
    type Content = Vec<EmotionSegment>;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Emotion
    }

    async fn materialize(
        &self,
        resolver: &ContentResolver,
        data: Value,
    ) -> Result<Option<Vec<EmotionSegment>>, ResolveError> {
        let url = pointer(data)?;
        resolver.fetch_json(&url).await.map(Some)
    }
}

/// Playable audio URL; consumed directly, never fetched
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioResource;

#[async_trait]
impl Resource for AudioResource {
    type Content = String;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Audio
    }

    async fn materialize(
        &self,
        _resolver: &ContentResolver,
        data: Value,
    ) -> Result<Option<String>, ResolveError> {
        let url = pointer(data)?;
        Ok((!url.is_empty()).then_some(url))
    }
}
