use docchat_core::conversation::ConversationLog;
use docchat_core::document::DocumentHandle;
use docchat_core::notice::Notice;
use docchat_core::session::{SessionPolicy, SessionRegistry};
use docchat_core::viewer::ViewerState;
use std::sync::{Mutex, MutexGuard};

/// Everything the view renders, owned by one orchestrator for the page's lifetime.
#[derive(Debug, Clone)]
pub struct ChatState {
    /// File picked for viewing/upload; cleared once an upload supersedes it
    pub selected: Option<DocumentHandle>,
    /// Written only by the upload path
    pub registry: SessionRegistry,
    /// Written only by the dispatch path
    pub log: ConversationLog,
    pub input: String,
    /// True while an upload or question round-trip is outstanding
    pub pending: bool,
    pub notice: Option<Notice>,
    pub viewer: ViewerState,
}

impl ChatState {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            selected: None,
            registry: SessionRegistry::new(policy),
            log: ConversationLog::new(),
            input: String::new(),
            pending: false,
            notice: None,
            viewer: ViewerState::Empty,
        }
    }
}

/// Locks the state, recovering the data if a previous holder panicked.
///
/// The lock is never held across an await point.
pub(crate) fn lock(state: &Mutex<ChatState>) -> MutexGuard<'_, ChatState> {
    state
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
