//! The pending flag and its release-on-every-exit guard.

use docchat_core::conversation::{ProvisionalTurn, Resolution, Turn};
use docchat_core::error::Result;
use docchat_core::event::ChatEvent;
use docchat_core::notice::Notice;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::dispatch::FALLBACK_ERROR_TEXT;
use crate::state::{self, ChatState};

/// Holds the pending flag for one round-trip.
///
/// Dropping the guard clears the flag, whatever path the round-trip took.
/// If it still owns an unresolved exchange at that point (the request future
/// was dropped), the exchange is resolved with the fallback error turn so the
/// conversation log never stays stuck on a user turn.
pub(crate) struct PendingGuard {
    state: Arc<Mutex<ChatState>>,
    events: broadcast::Sender<ChatEvent>,
    exchange: Option<ProvisionalTurn>,
}

impl PendingGuard {
    /// Sets the flag on `locked`, the caller's locked view of `state`.
    ///
    /// Returns `None` if a round-trip is already pending.
    pub(crate) fn arm(
        locked: &mut ChatState,
        state: &Arc<Mutex<ChatState>>,
        events: &broadcast::Sender<ChatEvent>,
    ) -> Option<Self> {
        if locked.pending {
            return None;
        }
        locked.pending = true;

        Some(Self {
            state: Arc::clone(state),
            events: events.clone(),
            exchange: None,
        })
    }

    pub(crate) fn hold_exchange(&mut self, exchange: ProvisionalTurn) {
        self.exchange = Some(exchange);
    }

    /// Resolves the held exchange and sets `notice`, then releases the flag.
    pub(crate) fn finish(mut self, resolution: Resolution, notice: Notice) -> Result<Turn> {
        let Some(exchange) = self.exchange.take() else {
            return Err(docchat_core::DocChatError::internal(
                "No exchange held by the pending guard",
            ));
        };

        let turn = {
            let mut locked = state::lock(&self.state);
            let turn = locked.log.resolve(exchange, resolution)?;
            locked.notice = Some(notice.clone());
            turn
        };

        let _ = self.events.send(ChatEvent::TurnAppended { turn: turn.clone() });
        let _ = self.events.send(ChatEvent::NoticeChanged {
            notice: Some(notice),
        });

        Ok(turn)
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let abandoned = {
            let mut locked = state::lock(&self.state);
            locked.pending = false;

            self.exchange.take().and_then(|exchange| {
                tracing::warn!(
                    "[Dispatch] Round-trip for turn {} abandoned before completion",
                    exchange.user_index()
                );
                locked
                    .log
                    .resolve(exchange, Resolution::Failure(FALLBACK_ERROR_TEXT.to_string()))
                    .ok()
            })
        };

        if let Some(turn) = abandoned {
            let _ = self.events.send(ChatEvent::TurnAppended { turn });
        }
        let _ = self.events.send(ChatEvent::PendingChanged { pending: false });
    }
}
