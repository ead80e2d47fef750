//! Slash commands understood by the REPL.

use std::path::PathBuf;

/// Completion candidates, in help order.
pub const COMMANDS: &[&str] = &[
    "/open", "/upload", "/docs", "/page", "/suggest", "/use", "/clear", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select a document and load it into the viewer
    Open(PathBuf),
    /// Upload the given file, or the current selection
    Upload(Option<PathBuf>),
    Docs,
    Page(u32),
    /// List suggestions for the given text
    Suggest(String),
    /// Send the n-th (1-based) listed suggestion
    Use(usize),
    Clear,
    Help,
    Quit,
    Ask(String),
    Invalid(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if !trimmed.starts_with('/') {
            return Some(Self::Ask(line.to_string()));
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        let command = match name {
            "/open" if rest.is_empty() => Self::Invalid("Usage: /open <path>".to_string()),
            "/open" => Self::Open(PathBuf::from(rest)),
            "/upload" if rest.is_empty() => Self::Upload(None),
            "/upload" => Self::Upload(Some(PathBuf::from(rest))),
            "/docs" => Self::Docs,
            "/page" => match rest.parse() {
                Ok(page) => Self::Page(page),
                Err(_) => Self::Invalid("Usage: /page <number>".to_string()),
            },
            "/suggest" => Self::Suggest(rest.to_string()),
            "/use" => match rest.parse() {
                Ok(index) if index > 0 => Self::Use(index),
                _ => Self::Invalid("Usage: /use <number>".to_string()),
            },
            "/clear" => Self::Clear,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Invalid(format!("Unknown command: {other}")),
        };
        Some(command)
    }
}

pub fn help_text() -> &'static str {
    "\
/open <path>     select a PDF and show it in the viewer
/upload [path]   upload a PDF (default: the current selection)
/docs            list uploaded documents
/page <n>        show page n of the selected PDF
/suggest [text]  list suggested questions
/use <n>         ask the n-th listed suggestion
/clear           discard the server session (single policy)
/quit            exit
Anything else is sent as a question."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_question() {
        assert_eq!(
            Command::parse("  what is this?"),
            Some(Command::Ask("  what is this?".to_string()))
        );
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn test_upload_with_and_without_path() {
        assert_eq!(Command::parse("/upload"), Some(Command::Upload(None)));
        assert_eq!(
            Command::parse("/upload  docs/My Report.pdf "),
            Some(Command::Upload(Some(PathBuf::from("docs/My Report.pdf"))))
        );
    }

    #[test]
    fn test_numeric_arguments() {
        assert_eq!(Command::parse("/page 3"), Some(Command::Page(3)));
        assert_eq!(Command::parse("/use 2"), Some(Command::Use(2)));
        assert!(matches!(Command::parse("/page x"), Some(Command::Invalid(_))));
        assert!(matches!(Command::parse("/use 0"), Some(Command::Invalid(_))));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Command::parse("/frobnicate"),
            Some(Command::Invalid("Unknown command: /frobnicate".to_string()))
        );
        assert_eq!(Command::parse("/exit"), Some(Command::Quit));
    }
}
