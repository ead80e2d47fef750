//! Error types for the DocChat client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire DocChat client.
///
/// Variants fall into three families:
/// - invalid input (`InvalidKind`, `NoSelection`, `PageOutOfRange`,
///   `EmptyQuestion`, `NoActiveSession`, `Busy`),
///   handled locally and never sent over the network
/// - transport failures (`Transport`), surfaced as notices and never retried
/// - everything else (viewer, configuration, IO, serialization, internal)
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocChatError {
    /// The selected file is not a PDF document
    #[error("Not a PDF document: '{display_name}'")]
    InvalidKind { display_name: String },

    /// There is no selected document to upload or view
    #[error("No document selected")]
    NoSelection,

    /// The requested page does not exist in the loaded document
    #[error("Page {page_number} is out of range (1-{page_count})")]
    PageOutOfRange { page_number: u32, page_count: u32 },

    /// The question was empty after trimming
    #[error("Question cannot be empty")]
    EmptyQuestion,

    /// No session or document identifier is registered yet
    #[error("No active session: upload a document first")]
    NoActiveSession,

    /// An upload or question round-trip is already in flight
    #[error("Another request is still in flight")]
    Busy,

    /// Network error, non-2xx response, or malformed response body
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status if a response was received
        status: Option<u16>,
        /// Server `detail` if present, otherwise the client-side error text
        message: String,
    },

    /// The document viewer failed to load the selected file
    #[error("Viewer load error: {0}")]
    ViewerLoad(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (reading the selected file, config file)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocChatError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error without an HTTP status
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error for a non-2xx response
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error is handled locally without a network call
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidKind { .. }
                | Self::NoSelection
                | Self::PageOutOfRange { .. }
                | Self::EmptyQuestion
                | Self::NoActiveSession
                | Self::Busy
        )
    }

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a viewer load failure
    pub fn is_viewer_load(&self) -> bool {
        matches!(self, Self::ViewerLoad(_))
    }

    /// Text suitable for a user-visible notice.
    ///
    /// For transport failures this is the server `detail` verbatim (or the
    /// client-side error text when no detail was returned).
    pub fn notice_text(&self) -> String {
        match self {
            Self::Transport { message, .. } if message.trim().is_empty() => {
                "Unknown error".to_string()
            }
            Self::Transport { message, .. } => message.clone(),
            Self::ViewerLoad(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DocChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DocChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DocChatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DocChatError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Failure of a single upload attempt.
///
/// Every variant leaves the session registry untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadError {
    /// Rejected locally: the file is not a PDF document. No request was made.
    #[error("Please select a valid PDF file. ('{display_name}' is not a PDF)")]
    InvalidKind { display_name: String },

    /// Rejected locally: another request is still in flight.
    #[error("Another request is still in flight")]
    Busy,

    /// Rejected locally: there is no selected document to upload.
    #[error("Please select a file first!")]
    NoSelection,

    /// The upload request failed (network, non-2xx, or malformed response).
    #[error("Error uploading file: {0}")]
    Transport(String),
}

impl From<UploadError> for DocChatError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidKind { display_name } => Self::InvalidKind { display_name },
            UploadError::Busy => Self::Busy,
            UploadError::NoSelection => Self::NoSelection,
            UploadError::Transport(message) => Self::transport(message),
        }
    }
}

/// A type alias for `Result<T, DocChatError>`.
pub type Result<T> = std::result::Result<T, DocChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_family() {
        assert!(DocChatError::EmptyQuestion.is_invalid_input());
        assert!(DocChatError::NoActiveSession.is_invalid_input());
        assert!(DocChatError::Busy.is_invalid_input());
        assert!(
            DocChatError::InvalidKind {
                display_name: "notes.txt".into()
            }
            .is_invalid_input()
        );
        assert!(!DocChatError::transport("boom").is_invalid_input());
    }

    #[test]
    fn test_notice_text_uses_detail_verbatim() {
        let err = DocChatError::http_status(400, "Only PDF files are allowed");
        assert!(err.is_transport());
        assert_eq!(err.notice_text(), "Only PDF files are allowed");
    }

    #[test]
    fn test_notice_text_falls_back_when_detail_blank() {
        let err = DocChatError::http_status(500, "  ");
        assert_eq!(err.notice_text(), "Unknown error");
    }

    #[test]
    fn test_upload_error_maps_into_shared_error() {
        let err: DocChatError = UploadError::Transport("connection refused".into()).into();
        assert!(err.is_transport());
        assert_eq!(err.notice_text(), "connection refused");

        let err: DocChatError = UploadError::Busy.into();
        assert_eq!(err, DocChatError::Busy);
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DocChatError = io.into();
        match err {
            DocChatError::Io { message } => assert!(message.contains("NotFound")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
