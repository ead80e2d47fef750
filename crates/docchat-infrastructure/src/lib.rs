pub mod config_service;
pub mod paths;

pub use crate::config_service::{ConfigService, ENDPOINT_ENV_VAR};
pub use crate::paths::DocChatPaths;
