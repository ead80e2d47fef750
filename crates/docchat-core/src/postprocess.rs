//! Normalization of raw answers before they enter the conversation log.

const TERMINAL_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// Normalizes a raw answer string.
///
/// Trims, uppercases the first character (ASCII mapping), collapses every
/// whitespace run to one space and appends `.` unless the text already ends
/// in `.`, `!` or `?`. Blank input yields an empty string.
///
/// The transformation is idempotent.
///
/// # Examples
///
/// ```
/// use docchat_core::postprocess::process;
///
/// assert_eq!(process("  the answer is 42  "), "The answer is 42.");
/// assert_eq!(process("   "), "");
/// ```
pub fn process(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut chars = trimmed.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };

    let mut result = capitalized.split_whitespace().collect::<Vec<_>>().join(" ");

    if !result.ends_with(TERMINAL_PUNCTUATION) {
        result.push('.');
    }

    result
}
