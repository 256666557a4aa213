//! Client configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictac_core::ConfigError;
use tracing::{debug, info, instrument};

use crate::http::HttpGameApi;
use crate::identity::IdentityStore;
use crate::sync::{ClientError, SyncClient};

/// Configuration for the game client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the game API, including its route prefix.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,

    /// Delay between status polls in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Polls before giving up on a change.
    #[serde(default = "default_max_polls")]
    max_polls: u32,

    /// Refuse moves locally when the cached board already rules them out.
    #[serde(default = "default_precheck")]
    precheck: bool,
}

#[instrument]
fn default_server_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

#[instrument]
fn default_request_timeout_ms() -> u64 {
    5_000
}

#[instrument]
fn default_poll_interval_ms() -> u64 {
    1_000
}

#[instrument]
fn default_max_polls() -> u32 {
    300
}

#[instrument]
fn default_precheck() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_ms: default_request_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: default_max_polls(),
            precheck: default_precheck(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads from `path` when given, otherwise starts from defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Overrides the server URL.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Overrides the pre-check flag.
    pub fn with_precheck(mut self, enabled: bool) -> Self {
        self.precheck = enabled;
        self
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Delay between polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Builds a client for the configured server.
    #[instrument(skip(self, identity), fields(server_url = %self.server_url))]
    pub fn connect(&self, identity: IdentityStore) -> Result<SyncClient<HttpGameApi>, ClientError> {
        let api = HttpGameApi::new(&self.server_url, self.request_timeout())
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(SyncClient::new(api, identity).with_precheck(self.precheck))
    }
}
