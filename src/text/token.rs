//! Word tokenization and normalization.
//!
//! Both the reference passage and recognizer hypotheses are reduced to the
//! same token form before comparison, so "The," and "the" align as equal.

use serde::{Deserialize, Serialize};

/// A normalized word unit from reference or hypothesis text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The word as it appeared in the source text.
    pub raw: String,
    /// Lowercased form with punctuation stripped; used for all comparisons.
    pub normalized: String,
    /// Zero-based position within the token sequence.
    pub position: usize,
}

impl Token {
    /// Creates a token from a raw word at the given position.
    pub fn new(raw: &str, position: usize) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: normalize_word(raw),
            position,
        }
    }
}

/// Lowercases a word and strips punctuation.
///
/// Keeps alphanumeric characters only, so "Mat!" and "mat" normalize
/// identically. Returns an empty string for punctuation-only input.
pub fn normalize_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Splits text on whitespace into normalized tokens.
///
/// Words that normalize to empty (punctuation-only fragments like "—")
/// are dropped; positions number the kept tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        let normalized = normalize_word(word);
        if normalized.is_empty() {
            continue;
        }
        tokens.push(Token {
            raw: word.to_string(),
            normalized,
            position: tokens.len(),
        });
    }
    tokens
}

/// An ordered, immutable token sequence for a reading passage.
///
/// Fixed for the lifetime of a session; the only way to change the
/// reference is to reset the session and start a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceText {
    raw: String,
    tokens: Vec<Token>,
}

impl ReferenceText {
    /// Tokenizes a passage into a reference text.
    pub fn new(text: &str) -> Self {
        Self {
            raw: text.to_string(),
            tokens: tokenize(text),
        }
    }

    /// The original passage text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The normalized token sequence.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens in the passage.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the passage contains no readable words.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize_word("The,"), "the");
        assert_eq!(normalize_word("mat!"), "mat");
        assert_eq!(normalize_word("Don't"), "dont");
        assert_eq!(normalize_word("HELLO"), "hello");
    }

    #[test]
    fn test_normalize_punctuation_only_is_empty() {
        assert_eq!(normalize_word("—"), "");
        assert_eq!(normalize_word("..."), "");
    }

    #[test]
    fn test_tokenize_positions_are_sequential() {
        let tokens = tokenize("The cat sat on the mat");
        assert_eq!(tokens.len(), 6);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.position, i);
        }
        assert_eq!(tokens[0].normalized, "the");
        assert_eq!(tokens[0].raw, "The");
    }

    #[test]
    fn test_tokenize_drops_punctuation_only_words() {
        let tokens = tokenize("stop — go");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].normalized, "stop");
        assert_eq!(tokens[1].normalized, "go");
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_tokenize_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
    }

    #[test]
    fn test_reference_text_is_immutable_view() {
        let reference = ReferenceText::new("The cat sat.");
        assert_eq!(reference.len(), 3);
        assert!(!reference.is_empty());
        assert_eq!(reference.raw(), "The cat sat.");
        assert_eq!(reference.tokens()[2].normalized, "sat");
    }

    #[test]
    fn test_reference_text_empty_when_no_words() {
        assert!(ReferenceText::new("").is_empty());
        assert!(ReferenceText::new("!!! ---").is_empty());
    }
}
