//! Prompt sanitization.
//!
//! Strips ASCII control characters (tab, newline and carriage return are
//! preserved) and trims surrounding whitespace, then enforces the length
//! bounds. The transform is idempotent.

use super::GenerateError;

/// Maximum sanitized prompt length, in chars.
pub const MAX_PROMPT_CHARS: usize = 500;

/// Control characters in 0x00–0x08, 0x0B–0x0C, 0x0E–0x1F are dropped.
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}')
}

/// Clean a raw prompt, rejecting empty and over-long results.
pub fn sanitize(prompt: &str) -> Result<String, GenerateError> {
    let cleaned: String = prompt.chars().filter(|c| !is_stripped_control(*c)).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(GenerateError::EmptyPrompt);
    }
    if cleaned.chars().count() > MAX_PROMPT_CHARS {
        return Err(GenerateError::PromptTooLong);
    }
    Ok(cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_control_chars() {
        assert_eq!(sanitize("a\u{01}b\u{1F}c").unwrap(), "abc");
    }

    #[test]
    fn preserves_tab_and_newline() {
        assert_eq!(sanitize("a\tb\nc").unwrap(), "a\tb\nc");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize("  draw a maze  ").unwrap(), "draw a maze");
    }

    #[test]
    fn control_only_prompt_is_empty() {
        assert!(matches!(sanitize("\u{01}\u{02}"), Err(GenerateError::EmptyPrompt)));
        assert!(matches!(sanitize("   "), Err(GenerateError::EmptyPrompt)));
        assert!(matches!(sanitize(""), Err(GenerateError::EmptyPrompt)));
    }

    #[test]
    fn over_long_prompt_rejected() {
        let long = "x".repeat(MAX_PROMPT_CHARS + 1);
        assert!(matches!(sanitize(&long), Err(GenerateError::PromptTooLong)));
        // Exactly at the limit is fine.
        let at_limit = "x".repeat(MAX_PROMPT_CHARS);
        assert_eq!(sanitize(&at_limit).unwrap().chars().count(), MAX_PROMPT_CHARS);
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        let prompt = "é".repeat(MAX_PROMPT_CHARS);
        assert!(sanitize(&prompt).is_ok());
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize(" draw \u{07}a rainbow \t now ").unwrap();
        let twice = sanitize(&once).unwrap();
        assert_eq!(once, twice);
    }
}
