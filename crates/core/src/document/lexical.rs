//! Content-word statistics for a phrase.

use crate::types::Token;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LexicalStats {
    /// Tokens that are not punctuation
    pub num_words: usize,
    /// Summed character length of those tokens
    pub total_chars: usize,
}

impl LexicalStats {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        tokens
            .iter()
            .filter(|t| !t.is_punctuation())
            .fold(Self::default(), |acc, t| Self {
                num_words: acc.num_words + 1,
                total_chars: acc.total_chars + t.text.chars().count(),
            })
    }

    /// True when the phrase has content words to drive the policy.
    pub fn has_words(&self) -> bool {
        self.num_words > 0
    }

    /// Mean word length in characters, or None without content words.
    pub fn avg_word_length(&self) -> Option<f64> {
        if self.num_words == 0 {
            return None;
        }
        Some(self.total_chars as f64 / self.num_words as f64)
    }
}
