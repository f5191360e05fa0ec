use super::models::{BulkDeleteRequest, DeleteResponse, SessionMetadata, UploadResponse};
use super::upload::{UploadError, UploadRequest};
use crate::api::{ApiError, ApiGateway};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tracing::{error, info};

/// Session list, upload and delete operations
#[derive(Clone)]
pub struct SessionOperations {
    gateway: ApiGateway,
}

impl SessionOperations {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// All sessions of the signed-in user; empty when nobody is signed in
    pub async fn list(&self) -> Result<Vec<SessionMetadata>, ApiError> {
        if !self.gateway.tokens().is_authenticated().await {
            return Ok(Vec::new());
        }

        let body = self.gateway.get("/api/sessions/metadata").await?;
        if body.is_null() {
            return Ok(Vec::new());
        }

        decode(body)
    }

    /// Validate and upload an audio file as a new session
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        title: Option<&str>,
    ) -> Result<UploadResponse, UploadError> {
        let request = UploadRequest::prepare(path, title)?;
        self.upload(&request).await
    }

    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, UploadError> {
        if !self.gateway.tokens().is_authenticated().await {
            return Err(UploadError::NotAuthenticated);
        }

        let bytes = tokio::fs::read(&request.path)
            .await
            .map_err(|source| UploadError::Io {
                path: request.path.display().to_string(),
                source,
            })?;

        info!(
            "Uploading {} ({} bytes, {}) as '{}'",
            request.file_name(),
            bytes.len(),
            request.mime,
            request.title
        );

        let part = Part::bytes(bytes)
            .file_name(request.file_name())
            .mime_str(request.mime)
            .map_err(ApiError::from)?;

        let form = Form::new()
            .part("file", part)
            .text("title", request.title.clone());

        let body = self
            .gateway
            .post_multipart("/api/sessions/upload", form)
            .await
            .map_err(|e| {
                error!("Upload failed: {}", e);
                e
            })?;

        let response: UploadResponse = decode(body)?;
        info!("Created session {}", response.session_id);
        Ok(response)
    }

    pub async fn delete(&self, session_id: &str) -> Result<(), ApiError> {
        let body = self
            .gateway
            .delete(&format!("/api/sessions/delete/{}", session_id))
            .await?;

        confirm(body, "Failed to delete session")?;
        info!("Deleted session {}", session_id);
        Ok(())
    }

    pub async fn delete_many(&self, session_ids: &[String]) -> Result<(), ApiError> {
        let body = self
            .gateway
            .post_json("/api/sessions/delete/bulk", &BulkDeleteRequest { session_ids })
            .await?;

        confirm(body, "Failed to delete sessions")?;
        info!("Deleted {} sessions", session_ids.len());
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn confirm(body: Value, failure: &str) -> Result<(), ApiError> {
    let response: DeleteResponse = serde_json::from_value(body).unwrap_or_default();
    if response.success {
        Ok(())
    } else {
        Err(ApiError::Rejected(failure.to_string()))
    }
}
