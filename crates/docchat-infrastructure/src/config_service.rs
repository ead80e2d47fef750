//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/docchat/config.toml`.
//! `DOCCHAT_ENDPOINT` is the only environment override and replaces the
//! endpoint base path.

use crate::paths::DocChatPaths;
use docchat_core::config::ClientConfig;
use docchat_core::error::{DocChatError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV_VAR: &str = "DOCCHAT_ENDPOINT";

/// Reads and writes the client configuration file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service for the default config path.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: DocChatPaths::config_file()?,
        })
    }

    /// Creates a service for a custom config path (for testing or `--config`).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, applying the environment override.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with_endpoint_override(std::env::var(ENDPOINT_ENV_VAR).ok())
    }

    /// Loads the configuration, replacing the endpoint when `endpoint` is set.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load_with_endpoint_override(&self, endpoint: Option<String>) -> Result<ClientConfig> {
        let mut config = if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            let config: ClientConfig = toml::from_str(&content)?;
            tracing::debug!("[Config] Loaded {}", self.path.display());
            config
        } else {
            tracing::debug!(
                "[Config] No config file at {}, using defaults",
                self.path.display()
            );
            ClientConfig::default()
        };

        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            tracing::info!("[Config] Endpoint overridden by {}", ENDPOINT_ENV_VAR);
            config.endpoint = endpoint.trim().to_string();
        }

        validate(&config)?;
        Ok(config)
    }

    /// Writes `config` to the config file, creating parent directories.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        validate(config)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

fn validate(config: &ClientConfig) -> Result<()> {
    let endpoint = config.endpoint.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(DocChatError::config(format!(
            "Endpoint must be an http(s) URL, got '{endpoint}'"
        )));
    }
    if config.upload_timeout_secs == 0 || config.question_timeout_secs == 0 {
        return Err(DocChatError::config("Timeouts must be at least one second"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_core::session::SessionPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let config = service.load_with_endpoint_override(None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("nested").join("config.toml"));

        let config = ClientConfig {
            endpoint: "https://chat.example.com".into(),
            policy: SessionPolicy::Single,
            upload_timeout_secs: 30,
            question_timeout_secs: 15,
        };
        service.save(&config).unwrap();

        assert_eq!(service.load_with_endpoint_override(None).unwrap(), config);
    }

    #[test]
    fn test_endpoint_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "endpoint = \"http://file:8000\"\n").unwrap();

        let service = ConfigService::with_path(path);
        let config = service
            .load_with_endpoint_override(Some(" http://env:9000 ".into()))
            .unwrap();
        assert_eq!(config.endpoint, "http://env:9000");

        let config = service.load_with_endpoint_override(Some("".into())).unwrap();
        assert_eq!(config.endpoint, "http://file:8000");
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "policy = [not toml").unwrap();

        let err = ConfigService::with_path(path)
            .load_with_endpoint_override(None)
            .unwrap_err();
        assert!(matches!(err, DocChatError::Serialization { .. }));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "question_timeout_secs = 0\n").unwrap();
        let service = ConfigService::with_path(path);
        assert!(matches!(
            service.load_with_endpoint_override(None),
            Err(DocChatError::Config(_))
        ));

        assert!(matches!(
            service.load_with_endpoint_override(Some("ftp://nope".into())),
            Err(DocChatError::Config(_))
        ));
    }
}
