use super::policy::ResolveFailurePolicy;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode content: {0}")]
    Decode(String),

    #[error("Expected a content URL, got {0}")]
    InvalidPointer(String),
}

/// Whether an envelope's data is a URL to fetch rather than inline content
pub fn is_pointer(data: &str) -> bool {
    let data = data.trim_start();
    data.starts_with("http://") || data.starts_with("https://")
}

/// Fetches pointer content
///
/// Content URLs are pre-signed storage links, so no auth header is sent.
#[derive(Clone)]
pub struct ContentResolver {
    client: Client,
    policy: ResolveFailurePolicy,
}

impl ContentResolver {
    pub fn new(client: Client, policy: ResolveFailurePolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> ResolveFailurePolicy {
        self.policy
    }

    /// Fetch the body at `url` as text
    pub async fn fetch_text(&self, url: &str) -> Result<String, ResolveError> {
        let response = self.fetch(url).await?;
        response.text().await.map_err(|e| ResolveError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch the body at `url` and decode it as JSON
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ResolveError> {
        let body = self.fetch_text(url).await?;
        serde_json::from_str(&body).map_err(|e| ResolveError::Decode(e.to_string()))
    }

    async fn fetch(&self, url: &str) -> Result<reqwest::Response, ResolveError> {
        debug!("Resolving content from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ResolveError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}
