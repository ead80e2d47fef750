//! Domain layer for DocChat.
//!
//! Documents, session identifiers, the conversation log, answer
//! normalization, prompt suggestions, and the contracts with the remote
//! service and the document viewer.

pub mod config;
pub mod conversation;
pub mod document;
pub mod error;
pub mod event;
pub mod notice;
pub mod postprocess;
pub mod service;
pub mod session;
pub mod suggestion;
pub mod viewer;

// Re-export common error types
pub use error::{DocChatError, UploadError};
