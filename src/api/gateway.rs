use super::auth::TokenProvider;
use super::error::ApiError;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const FALLBACK_ERROR: &str = "Request failed";

/// Body of an outgoing request
pub enum RequestBody {
    Empty,
    Json(Value),
    /// File upload; the transport writes the multipart boundary header itself
    Multipart(Form),
}

/// Thin authenticated wrapper around the analysis API
///
/// Stateless apart from the injected token provider, so clones are cheap and
/// can be handed to every resource pipeline.
#[derive(Clone)]
pub struct ApiGateway {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiGateway {
    /// Create a gateway with its own HTTP client
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self::with_client(client, base_url, tokens))
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenProvider> {
        &self.tokens
    }

    /// Underlying HTTP client, shared with the content resolvers
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, RequestBody::Empty).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, RequestBody::Empty).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::POST, path, RequestBody::Json(body)).await
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value, ApiError> {
        self.request(Method::POST, path, RequestBody::Multipart(form)).await
    }

    /// Send a request and return the parsed JSON body
    ///
    /// An empty success body is returned as `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut builder = self.client.request(method, &url);

        if let Some(token) = self.tokens.access_token().await {
            builder = builder.bearer_auth(token);
        }

        builder = match body {
            RequestBody::Multipart(form) => builder.multipart(form),
            RequestBody::Json(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            RequestBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
        };

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(status, &bytes);
            debug!("{} failed: {}", url, message);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Human-readable message for a failed response
///
/// Prefers the body's `detail`, then `message`. A body that is not JSON falls
/// back to the status line.
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    let status_line = || {
        format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )
        .trim_end()
        .to_string()
    };

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) | Err(_) => status_line(),
        Ok(value) => ["detail", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(describe))
            .unwrap_or_else(|| FALLBACK_ERROR.to_string()),
    }
}

fn describe(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
