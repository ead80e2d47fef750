use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::session::SessionPolicy;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_QUESTION_TIMEOUT_SECS: u64 = 60;

/// Client configuration, read once at startup.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the answering service
    pub endpoint: String,
    /// Session model; fixed for the lifetime of the orchestrator
    pub policy: SessionPolicy,
    pub upload_timeout_secs: u64,
    pub question_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            policy: SessionPolicy::default(),
            upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            question_timeout_secs: DEFAULT_QUESTION_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn question_timeout(&self) -> Duration {
        Duration::from_secs(self.question_timeout_secs)
    }

    /// Endpoint without trailing slashes.
    pub fn endpoint_base(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ClientConfig = toml::from_str("policy = \"single\"").unwrap();
        assert_eq!(config.policy, SessionPolicy::Single);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.question_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_endpoint_base_strips_trailing_slash() {
        let config = ClientConfig {
            endpoint: "http://localhost:8000//".into(),
            ..ClientConfig::default()
        };
        assert_eq!(config.endpoint_base(), "http://localhost:8000");
    }
}
