//! Request/response bodies of the answering service.
//!
//! Two server variants exist, one per session policy:
//!
//! | policy | upload            | question body                | answer key     | id key       |
//! |--------|-------------------|------------------------------|----------------|--------------|
//! | single | `POST /upload_pdf/` | `{session_id, user_message}` | `bot_response` | `session_id` |
//! | multi  | `POST /upload/`     | `{question, pdf_ids}`        | `answer`       | `pdf_id`     |
//!
//! Responses are parsed leniently: either id key and either answer key is
//! accepted, the active policy's key taking precedence.

use docchat_core::error::{DocChatError, Result};
use docchat_core::service::{AnswerReply, UploadReceipt};
use docchat_core::session::{SessionPolicy, SessionReference};
use serde::{Deserialize, Serialize};

/// Multipart field name carrying the file bytes.
pub const UPLOAD_FIELD: &str = "file";

pub fn upload_path(policy: SessionPolicy) -> &'static str {
    match policy {
        SessionPolicy::Single => "/upload_pdf/",
        SessionPolicy::Multi => "/upload/",
    }
}

pub const CHAT_PATH: &str = "/chat/";

pub fn session_path(session_id: &str) -> String {
    format!("/session/{session_id}")
}

pub fn health_path(policy: SessionPolicy) -> &'static str {
    match policy {
        SessionPolicy::Single => "/",
        SessionPolicy::Multi => "/health",
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub pdf_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub chunks: Option<u64>,
}

impl UploadResponse {
    pub fn into_receipt(self, policy: SessionPolicy) -> Result<UploadReceipt> {
        let (primary, secondary) = match policy {
            SessionPolicy::Single => (self.session_id, self.pdf_id),
            SessionPolicy::Multi => (self.pdf_id, self.session_id),
        };

        let id = primary
            .into_iter()
            .chain(secondary)
            .find(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                DocChatError::transport("Malformed upload response: no session_id or pdf_id")
            })?;

        Ok(UploadReceipt {
            id,
            message: self.message.filter(|m| !m.trim().is_empty()),
        })
    }
}

/// Question body; serialized untagged so each variant is the bare object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatRequest<'a> {
    Single {
        session_id: &'a str,
        user_message: &'a str,
    },
    Multi {
        question: &'a str,
        pdf_ids: &'a [String],
    },
}

impl<'a> ChatRequest<'a> {
    pub fn new(question: &'a str, scope: &'a SessionReference) -> Self {
        match scope {
            SessionReference::Single { session_id } => Self::Single {
                session_id,
                user_message: question,
            },
            SessionReference::Multi { document_ids } => Self::Multi {
                question,
                pdf_ids: document_ids,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub bot_response: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ChatResponse {
    /// A missing answer key is an empty answer, not an error.
    pub fn into_reply(self, policy: SessionPolicy) -> AnswerReply {
        let (primary, secondary) = match policy {
            SessionPolicy::Single => (self.bot_response, self.answer),
            SessionPolicy::Multi => (self.answer, self.bot_response),
        };

        AnswerReply {
            answer: primary.or(secondary).unwrap_or_default(),
            sources: self.sources,
        }
    }
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// Extracts the `detail` of an error body, verbatim when it is a string.
pub fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) => Some(detail),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
