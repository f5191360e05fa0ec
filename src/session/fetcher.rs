use super::envelope::Envelope;
use super::models::SessionMetadata;
use super::resource::ResourceKind;
use crate::api::{ApiError, ApiGateway};
use serde_json::Value;
use tracing::debug;

/// Per-resource envelope fetchers for a session
///
/// Each call needs a session id and a signed-in user. Without them no
/// request is made and the `Unavailable` sentinel envelope is returned, so
/// callers only ever branch on `status`.
#[derive(Clone)]
pub struct SessionFetcher {
    gateway: ApiGateway,
}

impl SessionFetcher {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Fetch the raw envelope of one resource
    pub async fn fetch(
        &self,
        kind: ResourceKind,
        session_id: &str,
    ) -> Result<Envelope<Value>, ApiError> {
        if session_id.is_empty() || !self.gateway.tokens().is_authenticated().await {
            debug!("Skipping {} fetch: no session id or user", kind);
            return Ok(Envelope::unavailable());
        }

        let body = self.gateway.get(&kind.path(session_id)).await?;
        if body.is_null() {
            return Ok(Envelope::unavailable());
        }

        let envelope: Envelope<Value> =
            serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(envelope.normalized())
    }

    pub async fn metadata(&self, session_id: &str) -> Result<Envelope<SessionMetadata>, ApiError> {
        let envelope = self.fetch(ResourceKind::Metadata, session_id).await?;
        let data = envelope
            .data
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(Envelope::new(envelope.status, data))
    }

    pub async fn summary(&self, session_id: &str) -> Result<Envelope<String>, ApiError> {
        self.fetch_pointer(ResourceKind::Summary, session_id).await
    }

    pub async fn transcript(&self, session_id: &str) -> Result<Envelope<String>, ApiError> {
        self.fetch_pointer(ResourceKind::Transcript, session_id).await
    }

    pub async fn emotion(&self, session_id: &str) -> Result<Envelope<String>, ApiError> {
        self.fetch_pointer(ResourceKind::Emotion, session_id).await
    }

    pub async fn audio(&self, session_id: &str) -> Result<Envelope<String>, ApiError> {
        self.fetch_pointer(ResourceKind::Audio, session_id).await
    }

    async fn fetch_pointer(
        &self,
        kind: ResourceKind,
        session_id: &str,
    ) -> Result<Envelope<String>, ApiError> {
        let envelope = self.fetch(kind, session_id).await?;
        Ok(envelope.map(|data| match data {
            Value::String(url) => url,
            other => other.to_string(),
        }))
    }
}
