//! Document handles.
//!
//! A [`DocumentHandle`] wraps a file the user selected or dropped, together
//! with whether the client recognizes it as a PDF. Handles are immutable;
//! once an upload succeeds the handle is superseded by a session reference.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// MIME type accepted for upload and viewing.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Where the raw bytes of a document live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A file on the local filesystem
    Path(PathBuf),
    /// Bytes already held in memory (drag-and-drop, tests)
    Bytes(Arc<[u8]>),
}

/// A file selected for upload or viewing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    source: DocumentSource,
    display_name: String,
    mime_type: String,
}

impl DocumentHandle {
    /// Creates a handle for a local file, guessing its MIME type from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = guess_mime_type(&path);

        Self {
            source: DocumentSource::Path(path),
            display_name,
            mime_type,
        }
    }

    /// Creates a handle for in-memory bytes.
    ///
    /// When `mime_type` is `None` it is guessed from `display_name`.
    pub fn from_bytes(
        display_name: impl Into<String>,
        mime_type: Option<&str>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let display_name = display_name.into();
        let mime_type = mime_type
            .map(str::to_string)
            .unwrap_or_else(|| guess_mime_type(Path::new(&display_name)));

        Self {
            source: DocumentSource::Bytes(bytes.into()),
            display_name,
            mime_type,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// Whether the client recognizes this file as a PDF document.
    pub fn is_document(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case(PDF_MIME_TYPE)
    }

    /// Reads the raw bytes of the document.
    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            DocumentSource::Path(path) => Ok(tokio::fs::read(path).await?),
            DocumentSource::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }
}

fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// One successful upload under the multi-document policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDocumentRecord {
    /// File name as shown to the user
    pub display_name: String,
    /// Server-issued document identifier
    pub document_id: String,
}
