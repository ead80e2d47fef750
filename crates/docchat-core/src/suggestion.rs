//! Prompt suggestions derived from the current input text.

/// Maximum number of suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 4;

/// Canned questions offered to the user, in display order.
pub const DEFAULT_CATALOG: &[&str] = &[
    "Summarize this PDF.",
    "What are the key points?",
    "What is the document about?",
    "List the main conclusions.",
    "Who is the author?",
    "Are there any important dates or deadlines?",
    "Explain the methodology used.",
    "What recommendations are made?",
];

/// Filters a fixed catalog against the text being typed.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine {
    catalog: &'static [&'static str],
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG)
    }
}

impl SuggestionEngine {
    pub fn new(catalog: &'static [&'static str]) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'static [&'static str] {
        self.catalog
    }

    /// Returns up to [`MAX_SUGGESTIONS`] catalog entries matching `input`.
    ///
    /// Blank input matches everything. Otherwise an entry matches when its
    /// lowercase form contains the lowercase trimmed input. Catalog order is
    /// preserved.
    pub fn filter(&self, input: &str) -> Vec<&'static str> {
        let needle = input.trim().to_lowercase();

        self.catalog
            .iter()
            .copied()
            .filter(|entry| needle.is_empty() || entry.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(entry: &str) -> usize {
        DEFAULT_CATALOG
            .iter()
            .position(|candidate| *candidate == entry)
            .expect("entry must come from the catalog")
    }

    #[test]
    fn test_blank_input_returns_catalog_head() {
        let engine = SuggestionEngine::default();
        assert_eq!(engine.filter(""), &DEFAULT_CATALOG[..MAX_SUGGESTIONS]);
        assert_eq!(engine.filter("   "), &DEFAULT_CATALOG[..MAX_SUGGESTIONS]);
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        let engine = SuggestionEngine::default();
        assert_eq!(engine.filter("  AUTHOR "), vec!["Who is the author?"]);
        assert_eq!(
            engine.filter("what"),
            vec![
                "What are the key points?",
                "What is the document about?",
                "What recommendations are made?",
            ]
        );
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(SuggestionEngine::default().filter("zebra").is_empty());
    }

    #[test]
    fn test_results_capped_and_order_preserving() {
        let engine = SuggestionEngine::default();
        for input in ["", "e", "a", "the", " ", "?", "s", "x"] {
            let results = engine.filter(input);
            assert!(results.len() <= MAX_SUGGESTIONS);

            let positions: Vec<usize> = results.iter().map(|entry| position(entry)).collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{input:?}");
        }
    }

    #[test]
    fn test_custom_catalog() {
        static CATALOG: &[&str] = &["Alpha", "beta", "ALPHABET"];
        let engine = SuggestionEngine::new(CATALOG);
        assert_eq!(engine.filter("alpha"), vec!["Alpha", "ALPHABET"]);
    }
}
