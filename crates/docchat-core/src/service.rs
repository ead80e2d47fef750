//! Contract with the remote answering service.
//!
//! The HTTP implementation lives in `docchat-interaction`; the orchestrator
//! only depends on this trait so it can be driven by an in-memory service in
//! tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::DocumentHandle;
use crate::error::Result;
use crate::session::{SessionPolicy, SessionReference};

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Server-issued session id (single policy) or document id (multi policy)
    pub id: String,
    /// Optional human-readable message from the server
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a successful question round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerReply {
    /// Raw answer text; empty when the service sent no answer.
    pub answer: String,
    /// Source excerpts, when the service provides them.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// The remote service that ingests documents and answers questions.
///
/// Every method is a single round-trip. Implementations report network
/// errors, non-2xx responses and malformed bodies as
/// `DocChatError::Transport`.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Uploads `document` and returns the identifier issued for it.
    async fn upload(&self, policy: SessionPolicy, document: &DocumentHandle)
    -> Result<UploadReceipt>;

    /// Asks `question` against every identifier in `scope`.
    async fn ask(&self, question: &str, scope: &SessionReference) -> Result<AnswerReply>;

    /// Discards a server-side session (single policy).
    async fn clear_session(&self, session_id: &str) -> Result<()>;

    /// Checks that the service is reachable.
    async fn health(&self, policy: SessionPolicy) -> Result<()>;
}
