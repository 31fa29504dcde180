//! Extractive summaries
//!
//! Takes the best-ranked sentences and puts them back into document order so
//! they read as a passage.

use serde::Serialize;

use crate::types::TextUnit;

/// Top-ranked sentences, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Selected sentences, sorted by input position
    pub sentences: Vec<TextUnit>,
}

impl Summary {
    /// Keep the first `k` units of a ranking and restore document order
    pub fn from_ranking(ranked: Vec<TextUnit>, k: usize) -> Self {
        let mut sentences: Vec<TextUnit> = ranked.into_iter().take(k).collect();
        sentences.sort_by_key(|s| s.index);
        Self { sentences }
    }

    /// Summary text, sentences joined by a single space
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of sentences in the summary
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if the summary is empty
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
