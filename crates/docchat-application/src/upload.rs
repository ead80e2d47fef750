//! Upload coordination: the only writer of the session registry.

use docchat_core::document::DocumentHandle;
use docchat_core::error::{DocChatError, Result, UploadError};
use docchat_core::event::ChatEvent;
use docchat_core::notice::Notice;
use docchat_core::session::{SessionPolicy, SessionReference, SessionUpdate};
use docchat_core::viewer::ViewerState;

use crate::orchestrator::ChatOrchestrator;
use crate::pending::PendingGuard;

const UPLOADING_NOTICE: &str = "Uploading and processing PDF...";
const UPLOADED_NOTICE: &str = "File uploaded and processed successfully!";
const CLEARED_NOTICE: &str = "Session cleared successfully";

impl ChatOrchestrator {
    /// Uploads `document` and registers the identifier the service issues.
    ///
    /// Under the single policy the identifier replaces the active session;
    /// under the multi policy it is appended to the document list.
    ///
    /// # Errors
    ///
    /// - `UploadError::InvalidKind` for a non-PDF file (no request is made)
    /// - `UploadError::Busy` while another round-trip is pending
    /// - `UploadError::Transport` if the request fails; the registry is unchanged
    pub async fn submit(&self, document: DocumentHandle) -> std::result::Result<SessionUpdate, UploadError> {
        // The in-flight round-trip owns the notice until it finishes.
        if self.is_pending() {
            tracing::debug!(
                "[Upload] Ignored upload of {} while a request is pending",
                document.display_name()
            );
            return Err(UploadError::Busy);
        }

        if !document.is_document() {
            tracing::info!(
                "[Upload] Rejected non-PDF file locally: {} ({})",
                document.display_name(),
                document.mime_type()
            );
            self.set_notice(Some(Notice::error("Please select a valid PDF file.")));
            return Err(UploadError::InvalidKind {
                display_name: document.display_name().to_string(),
            });
        }

        let (guard, policy) = {
            let mut locked = self.lock();
            let Some(guard) = PendingGuard::arm(&mut locked, &self.state, &self.events) else {
                tracing::debug!(
                    "[Upload] Ignored upload of {} while a request is pending",
                    document.display_name()
                );
                return Err(UploadError::Busy);
            };
            locked.notice = Some(Notice::info(UPLOADING_NOTICE));
            (guard, locked.registry.policy())
        };
        self.publish([
            ChatEvent::PendingChanged { pending: true },
            ChatEvent::NoticeChanged {
                notice: Some(Notice::info(UPLOADING_NOTICE)),
            },
        ]);

        tracing::info!(
            "[Upload] Uploading {} ({} policy)",
            document.display_name(),
            policy
        );
        let outcome = self.service.upload(policy, &document).await;

        let result = outcome.and_then(|receipt| {
            let mut locked = self.lock();
            let update = locked
                .registry
                .apply_upload(document.display_name(), &receipt)?;

            let superseded = locked.selected.as_ref() == Some(&document);
            if superseded {
                locked.selected = None;
                locked.viewer = ViewerState::Empty;
            }

            let message = receipt
                .message
                .clone()
                .unwrap_or_else(|| UPLOADED_NOTICE.to_string());
            locked.notice = Some(Notice::info(message));

            Ok((update, locked.registry.current().cloned(), superseded))
        });

        let result = match result {
            Ok((update, reference, superseded)) => {
                tracing::info!(
                    "[Upload] {} registered as {}",
                    document.display_name(),
                    update.issued_id()
                );
                let mut events = vec![ChatEvent::SessionChanged { reference }];
                if superseded {
                    events.push(ChatEvent::SelectionChanged { display_name: None });
                    events.push(ChatEvent::ViewerChanged {
                        state: ViewerState::Empty,
                    });
                }
                events.push(ChatEvent::NoticeChanged {
                    notice: self.notice(),
                });
                self.publish(events);
                Ok(update)
            }
            Err(err) => {
                tracing::warn!(
                    "[Upload] Failed to upload {}: {}",
                    document.display_name(),
                    err
                );
                let text = err.notice_text();
                self.set_notice(Some(Notice::error(format!("Error uploading file: {text}"))));
                Err(UploadError::Transport(text))
            }
        };

        drop(guard);
        result
    }

    /// Uploads the current selection.
    pub async fn upload_selected(&self) -> std::result::Result<SessionUpdate, UploadError> {
        match self.selected_document() {
            Some(document) => self.submit(document).await,
            None => {
                self.set_notice(Some(Notice::error("Please select a file first!")));
                Err(UploadError::NoSelection)
            }
        }
    }

    /// Discards the active server-side session (single policy only).
    ///
    /// On success the registry returns to empty. The conversation log is kept.
    pub async fn clear_session(&self) -> Result<()> {
        let (guard, session_id) = {
            let mut locked = self.lock();
            if locked.registry.policy() != SessionPolicy::Single {
                return Err(DocChatError::config(
                    "Clearing a session requires the single session policy",
                ));
            }
            let Some(SessionReference::Single { session_id }) = locked.registry.current().cloned()
            else {
                return Err(DocChatError::NoActiveSession);
            };
            let Some(guard) = PendingGuard::arm(&mut locked, &self.state, &self.events) else {
                return Err(DocChatError::Busy);
            };
            (guard, session_id)
        };
        self.publish([ChatEvent::PendingChanged { pending: true }]);

        let outcome = self.service.clear_session(&session_id).await;

        let result = match outcome {
            Ok(()) => {
                tracing::info!("[Upload] Cleared session {}", session_id);
                self.lock().registry.reset();
                self.publish([ChatEvent::SessionChanged { reference: None }]);
                self.set_notice(Some(Notice::info(CLEARED_NOTICE)));
                Ok(())
            }
            Err(err) => {
                tracing::warn!("[Upload] Failed to clear session {}: {}", session_id, err);
                self.set_notice(Some(Notice::error(format!(
                    "Error clearing session: {}",
                    err.notice_text()
                ))));
                Err(err)
            }
        };

        drop(guard);
        result
    }
}
