//! Terminal rendering of orchestrator events.

use colored::Colorize;
use docchat_core::conversation::{Speaker, Turn};
use docchat_core::document::UploadedDocumentRecord;
use docchat_core::event::ChatEvent;
use docchat_core::notice::{Notice, NoticeLevel};
use docchat_core::session::SessionReference;
use docchat_core::viewer::ViewerState;

/// Lines to print for `event`, if any.
///
/// User turns and input changes are not echoed; the prompt already shows them.
pub fn event_lines(event: &ChatEvent) -> Vec<String> {
    match event {
        ChatEvent::TurnAppended { turn } => turn_lines(turn),
        ChatEvent::NoticeChanged { notice: Some(notice) } => vec![notice_line(notice)],
        ChatEvent::SessionChanged { reference } => vec![session_line(reference.as_ref())],
        ChatEvent::ViewerChanged { state } => viewer_line(state).into_iter().collect(),
        ChatEvent::SelectionChanged {
            display_name: Some(name),
        } => vec![format!("Selected {name}").bright_black().to_string()],
        _ => Vec::new(),
    }
}

pub fn turn_lines(turn: &Turn) -> Vec<String> {
    match turn.speaker {
        Speaker::User => Vec::new(),
        Speaker::Assistant => turn
            .text
            .lines()
            .map(|line| line.bright_blue().to_string())
            .chain(
                turn.sources
                    .iter()
                    .map(|source| format!("  source: {source}").bright_black().to_string()),
            )
            .collect(),
        Speaker::SystemError => vec![turn.text.red().to_string()],
    }
}

pub fn notice_line(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!("* {}", notice.text).yellow().to_string(),
        NoticeLevel::Error => format!("! {}", notice.text).red().bold().to_string(),
    }
}

pub fn session_line(reference: Option<&SessionReference>) -> String {
    let text = match reference {
        None => "No active session".to_string(),
        Some(SessionReference::Single { session_id }) => format!("Session: {session_id}"),
        Some(SessionReference::Multi { document_ids }) => {
            format!("Documents in scope: {}", document_ids.len())
        }
    };
    text.bright_black().to_string()
}

pub fn viewer_line(state: &ViewerState) -> Option<String> {
    match state {
        ViewerState::Empty => None,
        ViewerState::Loaded {
            display_name,
            page_count,
        } => Some(
            format!("[{display_name}] {page_count} page(s)")
                .bright_magenta()
                .to_string(),
        ),
        // The notice carries the reason.
        ViewerState::Failed { .. } => None,
    }
}

pub fn document_lines(documents: &[UploadedDocumentRecord]) -> Vec<String> {
    if documents.is_empty() {
        return vec!["No documents uploaded yet".bright_black().to_string()];
    }
    documents
        .iter()
        .map(|doc| format!("{} (ID: {})", doc.display_name, doc.document_id))
        .collect()
}

pub fn suggestion_lines(suggestions: &[&str]) -> Vec<String> {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("  {}. {}", i + 1, s).cyan().to_string())
        .collect()
}
