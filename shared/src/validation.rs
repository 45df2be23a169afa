use regex::Regex;
use validator::ValidationError;

use crate::constants::{MAX_PHRASE_LENGTH, MAX_PHRASE_WORDS};

/// Advisory client-side phrase check. The server enforces the real rules;
/// this only catches what the UI can usefully reject before sending.
pub fn validate_phrase(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("empty_phrase"));
    }
    if trimmed.len() > MAX_PHRASE_LENGTH {
        return Err(ValidationError::new("phrase_too_long"));
    }
    if trimmed.split_whitespace().count() > MAX_PHRASE_WORDS {
        return Err(ValidationError::new("phrase_too_many_words"));
    }
    let allowed = Regex::new(r"^[A-Za-z0-9 ,.'!?-]+$").unwrap();
    if !allowed.is_match(trimmed) {
        return Err(ValidationError::new("phrase_invalid_characters"));
    }
    Ok(())
}

/// Copy rounds additionally require the copy to differ from the original.
pub fn validate_copy_phrase(text: &str, original: &str) -> Result<(), ValidationError> {
    validate_phrase(text)?;
    if normalize(text) == normalize(original) {
        return Err(ValidationError::new("copy_matches_original"));
    }
    Ok(())
}

/// Maps a validation error code to its user-facing message.
pub fn error_message(err: &ValidationError) -> &'static str {
    match err.code.as_ref() {
        "empty_phrase" => crate::constants::EMPTY_PHRASE_ERROR,
        "phrase_too_long" => crate::constants::PHRASE_TOO_LONG_ERROR,
        "phrase_too_many_words" => crate::constants::PHRASE_TOO_MANY_WORDS_ERROR,
        "phrase_invalid_characters" => crate::constants::PHRASE_CHARSET_ERROR,
        "copy_matches_original" => crate::constants::COPY_MATCHES_ORIGINAL_ERROR,
        _ => "Invalid phrase",
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_phrases() {
        assert!(validate_phrase("A famous last meal").is_ok());
        assert!(validate_phrase("It's over 9,000!").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert!(validate_phrase("").is_err());
        assert!(validate_phrase("   ").is_err());
    }

    #[test]
    fn test_rejects_overlong_phrase() {
        let long = "a".repeat(MAX_PHRASE_LENGTH + 1);
        assert!(validate_phrase(&long).is_err());
    }

    #[test]
    fn test_rejects_too_many_words() {
        let wordy = vec!["word"; MAX_PHRASE_WORDS + 1].join(" ");
        assert!(validate_phrase(&wordy).is_err());
    }

    #[test]
    fn test_rejects_disallowed_characters() {
        assert!(validate_phrase("phrase <script>").is_err());
        assert!(validate_phrase("émigré").is_err());
    }

    #[test]
    fn test_copy_must_differ_from_original() {
        assert!(validate_copy_phrase("warm pizza", "cold pizza").is_ok());
        assert!(validate_copy_phrase("cold pizza", "cold pizza").is_err());
        // Case and spacing differences do not count as differing.
        assert!(validate_copy_phrase("Cold  Pizza", "cold pizza").is_err());
    }
}
