use serde::{Deserialize, Serialize};

/// What to do when pointer content cannot be fetched or decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveFailurePolicy {
    /// Treat the content as absent and only log the failure
    #[default]
    Suppress,

    /// Record the failure on the resource so it can be shown to the user
    Surface,
}
