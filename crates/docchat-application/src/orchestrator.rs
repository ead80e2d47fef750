use docchat_core::conversation::Turn;
use docchat_core::document::{DocumentHandle, UploadedDocumentRecord};
use docchat_core::error::{DocChatError, Result};
use docchat_core::event::ChatEvent;
use docchat_core::notice::Notice;
use docchat_core::service::DocumentService;
use docchat_core::session::{SessionPolicy, SessionReference};
use docchat_core::suggestion::SuggestionEngine;
use docchat_core::viewer::{RenderedPage, ViewerAdapter, ViewerState};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;

use crate::state::{self, ChatState};

const EVENT_CAPACITY: usize = 256;

/// Client-side session and conversation orchestrator.
///
/// `ChatOrchestrator` is responsible for:
/// - Selecting documents and driving the viewer
/// - Uploading documents and registering the identifiers they yield
/// - Dispatching questions, one at a time, and recording their outcome
/// - Keeping the input buffer and its live suggestions
/// - Publishing every change on a single event channel
///
/// Clones share the same state.
#[derive(Clone)]
pub struct ChatOrchestrator {
    pub(crate) service: Arc<dyn DocumentService>,
    viewer: Arc<dyn ViewerAdapter>,
    suggestions: SuggestionEngine,
    pub(crate) state: Arc<Mutex<ChatState>>,
    pub(crate) events: broadcast::Sender<ChatEvent>,
}

impl ChatOrchestrator {
    /// Creates an orchestrator whose session policy is fixed to `policy`.
    pub fn new(
        policy: SessionPolicy,
        service: Arc<dyn DocumentService>,
        viewer: Arc<dyn ViewerAdapter>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            service,
            viewer,
            suggestions: SuggestionEngine::default(),
            state: Arc::new(Mutex::new(ChatState::new(policy))),
            events,
        }
    }

    /// Replaces the suggestion catalog.
    pub fn with_suggestions(mut self, suggestions: SuggestionEngine) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Subscribes to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    pub fn policy(&self) -> SessionPolicy {
        self.lock().registry.policy()
    }

    /// A copy of the whole state, for rendering.
    pub fn snapshot(&self) -> ChatState {
        self.lock().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().pending
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.lock().log.turns().to_vec()
    }

    pub fn session(&self) -> Option<SessionReference> {
        self.lock().registry.current().cloned()
    }

    pub fn can_dispatch(&self) -> bool {
        self.lock().registry.can_dispatch()
    }

    pub fn uploaded_documents(&self) -> Vec<UploadedDocumentRecord> {
        self.lock().registry.uploaded_documents().to_vec()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.lock().notice.clone()
    }

    pub fn dismiss_notice(&self) {
        self.set_notice(None);
    }

    // ============================================================================
    // Input buffer and suggestions
    // ============================================================================

    pub fn input(&self) -> String {
        self.lock().input.clone()
    }

    /// Replaces the input buffer and returns the suggestions for it.
    pub fn set_input(&self, text: impl Into<String>) -> Vec<&'static str> {
        let input = text.into();
        let suggestions = self.suggestions.filter(&input);

        self.lock().input = input.clone();
        self.publish([ChatEvent::InputChanged {
            input,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }]);

        suggestions
    }

    /// Suggestions for the current input buffer.
    pub fn suggestions(&self) -> Vec<&'static str> {
        let input = self.input();
        self.suggestions.filter(&input)
    }

    /// Copies a picked suggestion into the input buffer.
    pub fn use_suggestion(&self, suggestion: &str) -> Vec<&'static str> {
        self.set_input(suggestion)
    }

    // ============================================================================
    // Selection and viewer
    // ============================================================================

    pub fn selected_document(&self) -> Option<DocumentHandle> {
        self.lock().selected.clone()
    }

    /// Makes `document` the current selection and loads it into the viewer.
    ///
    /// A non-PDF file clears the selection instead. A viewer load failure is
    /// surfaced as a notice; the selection and the session are kept.
    pub fn select_document(&self, document: DocumentHandle) -> Result<ViewerState> {
        if !document.is_document() {
            tracing::info!(
                "[Viewer] Rejected selection of non-PDF file: {}",
                document.display_name()
            );
            self.lock().selected = None;
            self.publish([ChatEvent::SelectionChanged { display_name: None }]);
            self.apply_viewer_state(ViewerState::Empty);
            self.set_notice(Some(Notice::error("Please select a valid PDF file.")));
            return Err(DocChatError::InvalidKind {
                display_name: document.display_name().to_string(),
            });
        }

        let display_name = document.display_name().to_string();
        self.lock().selected = Some(document.clone());
        self.publish([ChatEvent::SelectionChanged {
            display_name: Some(display_name),
        }]);
        self.set_notice(None);

        let viewer_state = ViewerState::present(self.viewer.as_ref(), Some(&document));
        self.apply_viewer_state(viewer_state.clone());
        Ok(viewer_state)
    }

    /// Renders one page of the selected document.
    ///
    /// An out-of-range page is invalid input: the viewer state and the notice
    /// are left as they are. Only a load failure marks the viewer as failed.
    pub fn render_page(&self, page_number: u32) -> Result<RenderedPage> {
        let (document, loaded_pages) = {
            let locked = self.lock();
            let document = locked.selected.clone().ok_or(DocChatError::NoSelection)?;
            (document, locked.viewer.page_count())
        };

        if let Some(page_count) = loaded_pages {
            if page_number == 0 || page_number > page_count {
                return Err(DocChatError::PageOutOfRange {
                    page_number,
                    page_count,
                });
            }
        }

        self.viewer
            .render_page(&document, page_number)
            .inspect_err(|err| {
                if err.is_viewer_load() {
                    self.report_viewer_error(err.notice_text());
                }
            })
    }

    /// Surfaces a viewer failure reported outside of a load call.
    ///
    /// Only the viewer state and the notice change; the selection, the
    /// session and the conversation are untouched.
    pub fn report_viewer_error(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let display_name = self
            .lock()
            .selected
            .as_ref()
            .map(|d| d.display_name().to_string())
            .unwrap_or_default();

        self.apply_viewer_state(ViewerState::Failed {
            display_name,
            reason,
        });
    }

    pub(crate) fn apply_viewer_state(&self, viewer_state: ViewerState) {
        if let ViewerState::Failed {
            display_name,
            reason,
        } = &viewer_state
        {
            tracing::warn!("[Viewer] Failed to load {}: {}", display_name, reason);
            self.set_notice(Some(Notice::error(format!(
                "Error loading PDF document: {reason}"
            ))));
        }

        self.lock().viewer = viewer_state.clone();
        self.publish([ChatEvent::ViewerChanged {
            state: viewer_state,
        }]);
    }

    // ============================================================================
    // Internals
    // ============================================================================

    pub(crate) fn lock(&self) -> MutexGuard<'_, ChatState> {
        state::lock(&self.state)
    }

    pub(crate) fn set_notice(&self, notice: Option<Notice>) {
        self.lock().notice = notice.clone();
        self.publish([ChatEvent::NoticeChanged { notice }]);
    }

    /// Sends events; having no subscriber is not an error.
    pub(crate) fn publish(&self, events: impl IntoIterator<Item = ChatEvent>) {
        for event in events {
            let _ = self.events.send(event);
        }
    }
}
