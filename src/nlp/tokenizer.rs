//! Built-in sentence splitter and tokenizer
//!
//! Uses Unicode (UAX #29) sentence and word boundaries. Punctuation is kept as
//! separate tokens so it counts toward sentence length, and is tagged
//! [`PosTag::Punctuation`]. Words are left untagged; callers needing tagged
//! keyword extraction plug in their own [`NlpPipeline`].

use super::{is_symbolic, NlpPipeline};
use crate::types::{FeatureToken, PosTag};
use unicode_segmentation::UnicodeSegmentation;

/// Unicode-aware tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    lowercase: bool,
}

impl Tokenizer {
    /// Create a tokenizer that preserves token case
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercase every token before it reaches the graph
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    fn make_token(&self, word: &str) -> FeatureToken {
        let text = if self.lowercase {
            word.to_lowercase()
        } else {
            word.to_string()
        };

        if is_symbolic(word) {
            FeatureToken::tagged(text, PosTag::Punctuation)
        } else {
            FeatureToken::new(text)
        }
    }
}

impl NlpPipeline for Tokenizer {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn tokenize(&self, sentence: &str) -> Vec<FeatureToken> {
        sentence
            .split_word_bounds()
            .filter(|w| !w.trim().is_empty())
            .map(|w| self.make_token(w))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let tokenizer = Tokenizer::new();
        let sentences =
            tokenizer.split_sentences("The cat sat. The dog ran!  Did the bird fly?\n");

        assert_eq!(
            sentences,
            vec!["The cat sat.", "The dog ran!", "Did the bird fly?"]
        );
    }

    #[test]
    fn test_split_empty_text() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.split_sentences("").is_empty());
        assert!(tokenizer.split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_punctuation() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("The cat sat on the mat.");

        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["The", "cat", "sat", "on", "the", "mat", "."]);
        assert_eq!(tokens[6].pos, Some(PosTag::Punctuation));
        assert_eq!(tokens[1].pos, None);
    }

    #[test]
    fn test_tokenize_lowercase() {
        let tokenizer = Tokenizer::new().with_lowercase(true);
        let tokens = tokenizer.tokenize("Fox News");

        assert_eq!(tokens[0].text, "fox");
        assert_eq!(tokens[1].text, "news");
    }

    #[test]
    fn test_tokenizer_provides_no_tags() {
        assert!(!Tokenizer::new().provides_tags());
    }
}
