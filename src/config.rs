use crate::playback::DEFAULT_SECONDS_PER_ENTRY;
use crate::poll::{PollConfig, DEFAULT_POLL_INTERVAL};
use crate::resolve::ResolveFailurePolicy;
use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub polling: PollingConfig,
    pub playback: PlaybackConfig,
    pub resolve: ResolveConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer token; usually supplied via `SESSION_LENS_TOKEN` instead
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_secs: u64,

    /// Give up after this many polls per resource; unset polls indefinitely
    pub max_ticks: Option<u32>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            max_ticks: None,
        }
    }
}

impl PollingConfig {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(self.interval_secs.max(1)),
            max_ticks: self.max_ticks,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Audio span each transcript entry is assumed to cover when highlighting
    pub seconds_per_entry: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seconds_per_entry: DEFAULT_SECONDS_PER_ENTRY,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    pub on_failure: ResolveFailurePolicy,
}

impl Config {
    /// Load `path` (any format the `config` crate knows, extension optional)
    /// overlaid with `SESSION_LENS__SECTION__KEY` environment variables
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("SESSION_LENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
