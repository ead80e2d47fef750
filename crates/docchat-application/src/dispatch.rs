//! Question dispatch: the only writer of the conversation log.

use docchat_core::conversation::{Resolution, Turn};
use docchat_core::error::DocChatError;
use docchat_core::event::ChatEvent;
use docchat_core::notice::Notice;
use docchat_core::postprocess;

use crate::orchestrator::ChatOrchestrator;
use crate::pending::PendingGuard;

/// Text of the error turn appended when a question cannot be answered.
pub const FALLBACK_ERROR_TEXT: &str = "Sorry, I couldn't get a response.";

const EMPTY_QUESTION_NOTICE: &str = "Please type a question first.";
const NO_SESSION_NOTICE: &str = "Please upload at least one PDF before chatting.";
const WAITING_NOTICE: &str = "Getting response...";
const RECEIVED_NOTICE: &str = "Response received!";

/// What happened to a submitted question.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Another round-trip was pending; nothing changed.
    Ignored,
    /// Rejected locally with a notice; nothing was sent and the log is unchanged.
    Rejected(DocChatError),
    /// The service answered; carries the assistant turn.
    Answered(Turn),
    /// The round-trip failed; carries the system-error turn.
    Failed(Turn),
}

impl DispatchOutcome {
    /// Whether a request was sent.
    pub fn was_dispatched(&self) -> bool {
        matches!(self, Self::Answered(_) | Self::Failed(_))
    }
}

impl ChatOrchestrator {
    /// Sends `question` to the service and records the exchange.
    ///
    /// At most one round-trip is in flight: while one is pending this is a
    /// no-op. The user turn is appended before the request is made; exactly
    /// one assistant or system-error turn follows it. Failures never
    /// propagate past this call.
    pub async fn send(&self, question: &str) -> DispatchOutcome {
        let trimmed = question.trim();

        let (mut guard, scope, user_turn) = {
            let mut locked = self.lock();

            if locked.pending {
                tracing::debug!("[Dispatch] Ignored question while a request is pending");
                return DispatchOutcome::Ignored;
            }

            if trimmed.is_empty() {
                drop(locked);
                self.set_notice(Some(Notice::info(EMPTY_QUESTION_NOTICE)));
                return DispatchOutcome::Rejected(DocChatError::EmptyQuestion);
            }

            let Some(scope) = locked
                .registry
                .current()
                .filter(|scope| scope.is_dispatchable())
                .cloned()
            else {
                drop(locked);
                self.set_notice(Some(Notice::info(NO_SESSION_NOTICE)));
                return DispatchOutcome::Rejected(DocChatError::NoActiveSession);
            };

            let (provisional, user_turn) = match locked.log.begin_exchange(question) {
                Ok(started) => started,
                Err(err) => return DispatchOutcome::Rejected(err),
            };
            locked.input.clear();

            let Some(mut guard) = PendingGuard::arm(&mut locked, &self.state, &self.events) else {
                // Unreachable: `pending` was checked under the same lock.
                return DispatchOutcome::Ignored;
            };
            guard.hold_exchange(provisional);
            locked.notice = Some(Notice::info(WAITING_NOTICE));

            (guard, scope, user_turn)
        };

        self.publish([
            ChatEvent::TurnAppended { turn: user_turn },
            ChatEvent::InputChanged {
                input: String::new(),
                suggestions: self.suggestions().iter().map(|s| s.to_string()).collect(),
            },
            ChatEvent::PendingChanged { pending: true },
            ChatEvent::NoticeChanged {
                notice: Some(Notice::info(WAITING_NOTICE)),
            },
        ]);

        tracing::info!(
            "[Dispatch] Asking across {} identifier(s) ({} policy)",
            scope.len(),
            scope.policy()
        );

        match self.service.ask(trimmed, &scope).await {
            Ok(reply) => {
                let answer = postprocess::process(&reply.answer);
                if answer.is_empty() {
                    tracing::warn!("[Dispatch] Service returned an empty answer");
                }
                let resolution = Resolution::Answer {
                    text: answer,
                    sources: reply.sources,
                };
                match guard.finish(resolution, Notice::info(RECEIVED_NOTICE)) {
                    Ok(turn) => DispatchOutcome::Answered(turn),
                    Err(err) => DispatchOutcome::Rejected(err),
                }
            }
            Err(err) => {
                tracing::warn!("[Dispatch] Question failed: {}", err);
                let notice = Notice::error(format!("Error getting response: {}", err.notice_text()));
                match guard.finish(Resolution::Failure(FALLBACK_ERROR_TEXT.to_string()), notice) {
                    Ok(turn) => DispatchOutcome::Failed(turn),
                    Err(err) => DispatchOutcome::Rejected(err),
                }
            }
        }
    }

    /// Sends the current input buffer.
    pub async fn send_input(&self) -> DispatchOutcome {
        let input = self.input();
        self.send(&input).await
    }
}
