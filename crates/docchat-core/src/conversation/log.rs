use super::{Speaker, Turn};
use crate::error::{DocChatError, Result};

/// Proof that a user turn was appended and still awaits its response.
///
/// Returned by [`ConversationLog::begin_exchange`] and consumed by
/// [`ConversationLog::resolve`], so each user turn is resolved at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a provisional turn must be resolved"]
pub struct ProvisionalTurn {
    user_index: u64,
}

impl ProvisionalTurn {
    /// Sequence index of the user turn this exchange started with.
    pub fn user_index(&self) -> u64 {
        self.user_index
    }
}

/// How an exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Post-processed answer text from the service, with its cited sources.
    Answer { text: String, sources: Vec<String> },
    /// Fixed error-notice text.
    Failure(String),
}

impl Resolution {
    /// An answer without cited sources.
    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// Append-only, ordered sequence of turns.
///
/// A user turn is always followed by exactly one assistant or system-error
/// turn before another user turn may be appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    turns: Vec<Turn>,
    next_index: u64,
    awaiting: Option<u64>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// True while a user turn has no response yet.
    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Appends a provisional user turn.
    ///
    /// # Errors
    ///
    /// Returns `DocChatError::Busy` if the previous user turn is unresolved.
    pub fn begin_exchange(&mut self, text: impl Into<String>) -> Result<(ProvisionalTurn, Turn)> {
        if self.awaiting.is_some() {
            return Err(DocChatError::Busy);
        }

        let turn = self.push(Speaker::User, text.into(), Vec::new());
        self.awaiting = Some(turn.sequence_index);

        Ok((
            ProvisionalTurn {
                user_index: turn.sequence_index,
            },
            turn,
        ))
    }

    /// Appends the response that resolves `provisional`.
    ///
    /// # Errors
    ///
    /// Returns `DocChatError::Internal` if `provisional` does not belong to the
    /// exchange currently awaiting a response.
    pub fn resolve(&mut self, provisional: ProvisionalTurn, resolution: Resolution) -> Result<Turn> {
        if self.awaiting != Some(provisional.user_index) {
            return Err(DocChatError::internal(format!(
                "Turn {} is not awaiting a response",
                provisional.user_index
            )));
        }

        let turn = match resolution {
            Resolution::Answer { text, sources } => self.push(Speaker::Assistant, text, sources),
            Resolution::Failure(text) => self.push(Speaker::SystemError, text, Vec::new()),
        };
        self.awaiting = None;

        Ok(turn)
    }

    fn push(&mut self, speaker: Speaker, text: String, sources: Vec<String>) -> Turn {
        let turn = Turn {
            speaker,
            text,
            sequence_index: self.next_index,
            timestamp: chrono::Utc::now().to_rfc3339(),
            sources,
        };
        self.next_index += 1;
        self.turns.push(turn.clone());
        turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_appends_user_then_answer() {
        let mut log = ConversationLog::new();

        let (provisional, user) = log.begin_exchange("What is this?").unwrap();
        assert_eq!(user.speaker, Speaker::User);
        assert!(log.is_awaiting_response());

        let answer = log
            .resolve(provisional, Resolution::answer("A report."))
            .unwrap();
        assert_eq!(answer.speaker, Speaker::Assistant);
        assert!(answer.sources.is_empty());
        assert!(!log.is_awaiting_response());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_answer_keeps_cited_sources() {
        let mut log = ConversationLog::new();
        let (provisional, _) = log.begin_exchange("Where is it?").unwrap();

        let answer = log
            .resolve(
                provisional,
                Resolution::Answer {
                    text: "On page 3.".into(),
                    sources: vec!["report.pdf p.3".into()],
                },
            )
            .unwrap();
        assert_eq!(answer.sources, vec!["report.pdf p.3".to_string()]);
        assert_eq!(log.last(), Some(&answer));
    }

    #[test]
    fn test_second_user_turn_rejected_while_awaiting() {
        let mut log = ConversationLog::new();
        let (_provisional, _) = log.begin_exchange("first").unwrap();

        let err = log.begin_exchange("second").unwrap_err();
        assert_eq!(err, DocChatError::Busy);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_failure_resolves_with_system_error() {
        let mut log = ConversationLog::new();
        let (provisional, _) = log.begin_exchange("hello").unwrap();
        let turn = log
            .resolve(provisional, Resolution::Failure("Sorry".into()))
            .unwrap();
        assert_eq!(turn.speaker, Speaker::SystemError);
        assert!(turn.speaker.is_response());
    }

    #[test]
    fn test_stale_provisional_is_rejected() {
        let mut log = ConversationLog::new();
        let (first, _) = log.begin_exchange("one").unwrap();
        let stale = ProvisionalTurn {
            user_index: first.user_index(),
        };
        log.resolve(first, Resolution::answer("1.")).unwrap();

        let err = log.resolve(stale, Resolution::answer("again.")).unwrap_err();
        assert!(matches!(err, DocChatError::Internal(_)));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_sequence_index_strictly_increasing_and_alternating() {
        let mut log = ConversationLog::new();
        for i in 0..5 {
            let (provisional, _) = log.begin_exchange(format!("q{i}")).unwrap();
            let resolution = if i % 2 == 0 {
                Resolution::answer(format!("a{i}."))
            } else {
                Resolution::Failure("Sorry".into())
            };
            log.resolve(provisional, resolution).unwrap();
        }

        let turns = log.turns();
        assert_eq!(turns.len(), 10);
        for pair in turns.windows(2) {
            assert!(pair[0].sequence_index < pair[1].sequence_index);
        }
        for chunk in turns.chunks(2) {
            assert_eq!(chunk[0].speaker, Speaker::User);
            assert!(chunk[1].speaker.is_response());
        }
    }
}
