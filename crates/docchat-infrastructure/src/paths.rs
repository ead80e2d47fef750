//! Path management for DocChat configuration and logs.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/docchat/           # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── logs/                    # Application logs
//!     └── docchat.log.YYYY-MM-DD
//! ```

use docchat_core::error::{DocChatError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "docchat";

pub struct DocChatPaths;

impl DocChatPaths {
    /// Returns the DocChat configuration directory (e.g., `~/.config/docchat/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| DocChatError::config("Cannot find config directory"))
    }

    /// Returns the default configuration file path.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the log directory.
    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
