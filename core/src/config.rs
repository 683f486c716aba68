//! Client configuration.
//!
//! Built in code with `ClientConfig::new` or read from the environment:
//! - `SURVEY_API_URL` (required): base server URI.
//! - `SURVEY_API_TIMEOUT_SECS` (optional): per-request timeout in seconds.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const SERVER_URI_VAR: &str = "SURVEY_API_URL";
pub const TIMEOUT_VAR: &str = "SURVEY_API_TIMEOUT_SECS";

const DEFAULT_USER_AGENT: &str = concat!("survey-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URI of the survey API, e.g. `https://api.example.com/v1/`.
    pub server_uri: String,
    /// Handed to the transport; `None` leaves the transport default.
    #[serde(default)]
    pub timeout: Option<Duration>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl ClientConfig {
    pub fn new(server_uri: impl Into<String>) -> Self {
        Self {
            server_uri: server_uri.into(),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_uri = lookup(SERVER_URI_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidConfig(format!("{SERVER_URI_VAR} must be set")))?;
        let mut config = Self::new(server_uri);

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::InvalidConfig(format!(
                    "{TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
