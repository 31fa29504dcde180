//! Stopword filtering
//!
//! Multi-language stopword lists from the `stop-words` crate, extended with
//! punctuation marks and any caller-supplied words. A filter is built once at
//! startup and only read afterwards.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Punctuation tokens treated as stopwords by every language list
const PUNCTUATION: &[&str] = &[
    ".", ",", ";", ":", "!", "?", "'", "\"", "(", ")", "[", "]", "{", "}", "-", "--", "—", "–",
    "…", "...", "``", "''", "`", "/", "&", "*", "“", "”", "‘", "’",
];

/// A filter for removing stopwords from text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Create a new stopword filter for the given language
    ///
    /// Unknown language codes fall back to English.
    pub fn new(language: &str) -> Self {
        let mut stopwords = Self::load_stopwords(language);
        stopwords.extend(PUNCTUATION.iter().map(|p| p.to_string()));
        Self { stopwords }
    }

    /// Create a filter for `language` extended with extra words
    pub fn with_additional<S: AsRef<str>>(language: &str, extra: &[S]) -> Self {
        let mut filter = Self::new(language);
        filter
            .stopwords
            .extend(extra.iter().map(|w| w.as_ref().to_lowercase()));
        filter
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list only
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Read a newline-separated word list, one stopword per line
    pub fn from_lines(contents: &str) -> Self {
        Self {
            stopwords: contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_lowercase)
                .collect(),
        }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.stopwords.contains(word) {
            return true;
        }
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: &str) -> FxHashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            _ => LANGUAGE::English,
        };

        get(lang).iter().map(|s| s.to_lowercase()).collect()
    }
}
