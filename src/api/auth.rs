use async_trait::async_trait;

/// Source of the current user's access token
///
/// The gateway asks for the token before every request, so implementations
/// may refresh or rotate tokens between calls.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current bearer token, or `None` when no user is signed in
    async fn access_token(&self) -> Option<String>;

    /// Whether a user is signed in
    async fn is_authenticated(&self) -> bool {
        self.access_token().await.is_some()
    }
}

/// Token provider backed by a fixed value (CLI flag, config file, tests)
#[derive(Debug, Clone, Default)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.trim().is_empty()).then_some(token),
        }
    }

    /// Provider with no signed-in user
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn from_option(token: Option<String>) -> Self {
        token.map(Self::new).unwrap_or_default()
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Option<String> {
        self.token.clone()
    }
}
