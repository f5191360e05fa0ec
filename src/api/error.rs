use thiserror::Error;

/// Errors surfaced by the request gateway
///
/// Every variant carries a human-readable message suitable for showing to
/// the user as-is.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Server answered with a non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Request never produced a response (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Server accepted the request but reported that it did not succeed
    #[error("{0}")]
    Rejected(String),

    /// Success status but the body was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, if the server responded
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
