use serde::{Deserialize, Serialize};

use super::SessionPolicy;
use crate::document::UploadedDocumentRecord;

/// Identifiers a question is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionReference {
    Single { session_id: String },
    /// Insertion order is upload order; duplicates are kept.
    Multi { document_ids: Vec<String> },
}

impl SessionReference {
    pub fn policy(&self) -> SessionPolicy {
        match self {
            Self::Single { .. } => SessionPolicy::Single,
            Self::Multi { .. } => SessionPolicy::Multi,
        }
    }

    /// True iff at least one non-blank identifier is present.
    pub fn is_dispatchable(&self) -> bool {
        match self {
            Self::Single { session_id } => !session_id.trim().is_empty(),
            Self::Multi { document_ids } => document_ids.iter().any(|id| !id.trim().is_empty()),
        }
    }

    /// Number of identifiers referenced by a question.
    pub fn len(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Multi { document_ids } => document_ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What a successful upload did to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionUpdate {
    /// Single policy: the active session was replaced.
    Replaced {
        previous: Option<String>,
        session_id: String,
    },
    /// Multi policy: a document was appended.
    Appended {
        record: UploadedDocumentRecord,
        total: usize,
    },
}

impl SessionUpdate {
    /// The identifier issued by the server for this upload.
    pub fn issued_id(&self) -> &str {
        match self {
            Self::Replaced { session_id, .. } => session_id,
            Self::Appended { record, .. } => &record.document_id,
        }
    }
}
