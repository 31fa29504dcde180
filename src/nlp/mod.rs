//! Natural Language Processing components
//!
//! This module defines the boundary to the NLP collaborator (sentence
//! splitting, tokenization, tagging), the built-in tokenizer, stopword
//! filtering and the filter policy applied when weighting edges.

pub mod stopwords;
pub mod tokenizer;

use std::sync::Arc;

use crate::types::FeatureToken;
use stopwords::StopwordFilter;

/// Turns raw text into sentences and sentences into tokens.
///
/// Model loading and any I/O belong to the implementation; the ranking core
/// only calls these methods.
pub trait NlpPipeline {
    /// Split raw text into sentence strings, in document order.
    fn split_sentences(&self, text: &str) -> Vec<String>;

    /// Tokenize one sentence, optionally tagging each token.
    fn tokenize(&self, sentence: &str) -> Vec<FeatureToken>;

    /// Whether [`NlpPipeline::tokenize`] assigns content-word tags.
    fn provides_tags(&self) -> bool {
        false
    }
}

impl<P: NlpPipeline + ?Sized> NlpPipeline for Arc<P> {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        (**self).split_sentences(text)
    }

    fn tokenize(&self, sentence: &str) -> Vec<FeatureToken> {
        (**self).tokenize(sentence)
    }

    fn provides_tags(&self) -> bool {
        (**self).provides_tags()
    }
}

/// Check whether `text` has no letters or digits (punctuation, symbols)
pub fn is_symbolic(text: &str) -> bool {
    text.chars().all(|c| !c.is_alphanumeric())
}

/// Decides whether a token contributes to similarity or becomes a keyword
#[derive(Debug, Clone)]
pub enum FilterPolicy {
    /// Token passes if it has a letter or digit and its lowercase form is
    /// not a stopword
    Stopwords(Arc<StopwordFilter>),
    /// Token passes if tagged adjective, noun or verb; stopwords are ignored
    Tagged,
}

impl FilterPolicy {
    /// Stopword policy over a shared filter
    pub fn stopwords(filter: Arc<StopwordFilter>) -> Self {
        FilterPolicy::Stopwords(filter)
    }

    /// Check whether `token` passes this policy
    #[inline]
    pub fn passes(&self, token: &FeatureToken) -> bool {
        match self {
            FilterPolicy::Stopwords(filter) => {
                !is_symbolic(&token.text) && !filter.is_stopword(&token.text)
            }
            FilterPolicy::Tagged => token.pos.is_some_and(|p| p.is_content_word()),
        }
    }
}
