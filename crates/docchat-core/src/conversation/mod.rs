//! Conversation history.
//!
//! - `turn`: a single user question, assistant answer, or error notice (`Turn`, `Speaker`)
//! - `log`: the append-only history and its two-phase exchange lifecycle (`ConversationLog`)

mod log;
mod turn;

pub use log::{ConversationLog, ProvisionalTurn, Resolution};
pub use turn::{Speaker, Turn};
