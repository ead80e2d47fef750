use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use docchat_core::suggestion::SuggestionEngine;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::COMMANDS;

/// Rustyline helper: command completion, and suggested questions as inline hints.
#[derive(Clone)]
pub struct ChatHelper {
    suggestions: SuggestionEngine,
}

impl ChatHelper {
    pub fn new(suggestions: SuggestionEngine) -> Self {
        Self { suggestions }
    }

    /// Remainder of the first suggested question that extends `line`.
    fn question_hint(&self, line: &str) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }
        let lowered = line.to_lowercase();

        self.suggestions
            .filter(line)
            .into_iter()
            .find(|s| s.len() > line.len() && s.to_lowercase().starts_with(&lowered))
            .and_then(|s| s.get(line.len()..))
            .map(str::to_string)
    }
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates = COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else if !line.starts_with('/') {
            let candidates = self
                .suggestions
                .filter(line)
                .into_iter()
                .map(|s| Pair {
                    display: s.to_string(),
                    replacement: s.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }

        if line.starts_with('/') {
            if line.contains(' ') {
                return None;
            }
            COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            self.question_hint(line)
        }
    }
}

impl Validator for ChatHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_hint_extends_prefix() {
        let helper = ChatHelper::new(SuggestionEngine::default());
        assert_eq!(helper.question_hint("who is"), Some(" the author?".to_string()));
        assert_eq!(helper.question_hint("WHAT are"), Some(" the key points?".to_string()));
    }

    #[test]
    fn test_no_hint_for_blank_or_unmatched_input() {
        let helper = ChatHelper::new(SuggestionEngine::default());
        assert_eq!(helper.question_hint(""), None);
        // Matches "Who is the author?" by substring but not as a prefix.
        assert_eq!(helper.question_hint("author"), None);
    }
}
