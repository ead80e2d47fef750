use serde::{Deserialize, Serialize};

use crate::conversation::Turn;
use crate::notice::Notice;
use crate::session::SessionReference;
use crate::viewer::ViewerState;

/// Change notifications published by the orchestrator.
///
/// Views subscribe to these instead of observing state directly; what to do
/// with them (scrolling, repainting) is up to the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A turn was appended to the conversation log.
    TurnAppended { turn: Turn },
    /// The pending flag changed.
    PendingChanged { pending: bool },
    /// The session registry changed after an upload or a clear.
    SessionChanged {
        #[serde(default)]
        reference: Option<SessionReference>,
    },
    /// The info banner changed.
    NoticeChanged {
        #[serde(default)]
        notice: Option<Notice>,
    },
    /// The selected document changed.
    SelectionChanged {
        #[serde(default)]
        display_name: Option<String>,
    },
    /// The viewer finished (re)loading.
    ViewerChanged { state: ViewerState },
    /// The input buffer changed; suggestions are re-derived from it.
    InputChanged {
        input: String,
        suggestions: Vec<String>,
    },
}
