//! Application layer for DocChat.
//!
//! [`ChatOrchestrator`] turns user actions (file selection, uploads, typing,
//! question submission) into a consistent sequence of session state,
//! conversation turns and notices, and publishes every change as a
//! [`docchat_core::event::ChatEvent`].

mod dispatch;
mod orchestrator;
mod pending;
mod state;
mod upload;

pub use dispatch::{DispatchOutcome, FALLBACK_ERROR_TEXT};
pub use orchestrator::ChatOrchestrator;
pub use state::ChatState;
