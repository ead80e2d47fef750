use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// A question typed by the user.
    User,
    /// An answer from the remote service.
    Assistant,
    /// A locally generated notice that a question could not be answered.
    SystemError,
}

impl Speaker {
    /// Whether this turn resolves a preceding user turn.
    pub fn is_response(&self) -> bool {
        matches!(self, Self::Assistant | Self::SystemError)
    }
}

/// One unit of conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    /// Strictly increasing within a log.
    pub sequence_index: u64,
    /// Timestamp when the turn was appended (ISO 8601 format).
    pub timestamp: String,
    /// Passages the service cited for an assistant answer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}
