//! Core types for sentrank
//!
//! This module defines the data structures shared by every stage: tagged
//! feature tokens, text units (graph nodes), initial-score strategies and the
//! extraction configuration.

use crate::errors::{Result, TextRankError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

// ============================================================================
// Part of speech
// ============================================================================

/// Part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    Verb,
    /// Auxiliaries and modals (`AUX`, `MD`); not a content word
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Interjection,
    Numeral,
    Particle,
    Punctuation,
    Symbol,
    ProperNoun,
    Other,
}

impl PosTag {
    /// Check if this tag passes the tagged filter (adjective, noun or verb)
    pub fn is_content_word(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::Verb | PosTag::Adjective | PosTag::ProperNoun
        )
    }

    /// Parse from a universal (spaCy-style) POS tag
    pub fn from_spacy(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "VERB" => PosTag::Verb,
            "AUX" => PosTag::Auxiliary,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "PRON" => PosTag::Pronoun,
            "DET" => PosTag::Determiner,
            "ADP" => PosTag::Preposition,
            "CCONJ" | "SCONJ" => PosTag::Conjunction,
            "INTJ" => PosTag::Interjection,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "PUNCT" => PosTag::Punctuation,
            "SYM" => PosTag::Symbol,
            "PROPN" => PosTag::ProperNoun,
            _ => PosTag::Other,
        }
    }

    /// Parse from a Penn Treebank tag (as emitted by OpenNLP or Stanford taggers)
    ///
    /// Matching is by prefix, so `NNS`, `VBD` and `JJR` map to their base class.
    pub fn from_penn(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.starts_with("NNP") {
            PosTag::ProperNoun
        } else if tag.starts_with("NN") {
            PosTag::Noun
        } else if tag.starts_with("JJ") {
            PosTag::Adjective
        } else if tag.starts_with("VB") {
            PosTag::Verb
        } else if tag == "MD" {
            PosTag::Auxiliary
        } else if tag.starts_with("RB") || tag == "WRB" {
            PosTag::Adverb
        } else if tag.starts_with("PRP") || tag.starts_with("WP") || tag == "EX" {
            PosTag::Pronoun
        } else if matches!(tag, "DT" | "PDT" | "WDT") {
            PosTag::Determiner
        } else if tag == "IN" {
            PosTag::Preposition
        } else if tag == "CC" {
            PosTag::Conjunction
        } else if tag == "UH" {
            PosTag::Interjection
        } else if tag == "CD" {
            PosTag::Numeral
        } else if matches!(tag, "RP" | "TO" | "POS") {
            PosTag::Particle
        } else if tag == "SYM" || tag == "$" || tag == "#" {
            PosTag::Symbol
        } else if !tag.is_empty() && tag.chars().all(|c| !c.is_alphanumeric()) {
            PosTag::Punctuation
        } else {
            PosTag::Other
        }
    }

    /// Parse either tag set, trying universal tags first
    pub fn parse(tag: &str) -> Self {
        match PosTag::from_spacy(tag) {
            PosTag::Other if !tag.eq_ignore_ascii_case("X") => PosTag::from_penn(tag),
            pos => pos,
        }
    }
}

// ============================================================================
// Feature tokens & text units
// ============================================================================

/// A token produced by the NLP pipeline, with an optional grammatical tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureToken {
    /// The token string used for matching
    pub text: String,
    /// Part-of-speech tag, if the pipeline assigns one
    pub pos: Option<PosTag>,
}

impl FeatureToken {
    /// Create an untagged token
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: None,
        }
    }

    /// Create a tagged token
    pub fn tagged(text: impl Into<String>, pos: PosTag) -> Self {
        Self {
            text: text.into(),
            pos: Some(pos),
        }
    }

    /// Case-normalized form, used for stopword lookups and keyword nodes
    pub fn normalized(&self) -> String {
        self.text.to_lowercase()
    }
}

/// A ranked node: a sentence, or a keyword in keyword mode
///
/// Identity is positional; two units with the same text are distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Position of this unit in the input sequence
    pub index: usize,
    /// Raw surface text
    pub text: String,
    /// Token sequence used for similarity
    pub features: Vec<FeatureToken>,
    /// Current TextRank score
    pub score: f64,
}

impl TextUnit {
    /// Create a new unit with a zero score
    pub fn new(index: usize, text: impl Into<String>, features: Vec<FeatureToken>) -> Self {
        Self {
            index,
            text: text.into(),
            features,
            score: 0.0,
        }
    }

    /// Number of tokens in this unit
    pub fn token_count(&self) -> usize {
        self.features.len()
    }
}

// ============================================================================
// Initial scores
// ============================================================================

/// Strategy for seeding node scores before the first sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialScores {
    /// Every node starts at the same value
    Constant { value: f64 },
    /// Each node draws from `(0, max]`; a seed makes the draw reproducible
    Uniform { max: f64, seed: Option<u64> },
}

impl Default for InitialScores {
    fn default() -> Self {
        InitialScores::Uniform {
            max: 10.0,
            seed: None,
        }
    }
}

impl InitialScores {
    /// Constant seeding, the deterministic choice for tests
    pub fn constant(value: f64) -> Self {
        InitialScores::Constant { value }
    }

    /// Seeded uniform draw in `(0, max]`
    pub fn seeded(max: f64, seed: u64) -> Self {
        InitialScores::Uniform {
            max,
            seed: Some(seed),
        }
    }

    /// Produce `n` strictly positive starting scores
    pub fn generate(&self, n: usize) -> Vec<f64> {
        match *self {
            InitialScores::Constant { value } => vec![value; n],
            InitialScores::Uniform { max, seed: Some(seed) } => {
                let mut rng = StdRng::seed_from_u64(seed);
                Self::draw(&mut rng, max, n)
            }
            InitialScores::Uniform { max, seed: None } => {
                let mut rng = rand::rng();
                Self::draw(&mut rng, max, n)
            }
        }
    }

    // `random::<f64>()` is in [0, 1), so `1 - x` lands in (0, 1].
    fn draw(rng: &mut impl Rng, max: f64, n: usize) -> Vec<f64> {
        (0..n).map(|_| max * (1.0 - rng.random::<f64>())).collect()
    }

    fn validate(&self) -> Result<()> {
        let (name, value) = match *self {
            InitialScores::Constant { value } => ("initial score", value),
            InitialScores::Uniform { max, .. } => ("initial score maximum", max),
        };
        if !value.is_finite() || value <= 0.0 {
            return Err(TextRankError::invalid_config(format!(
                "{} must be a positive finite number, got {}",
                name, value
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Filter mode
// ============================================================================

/// Which rule decides whether a token contributes to similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Token passes if its lowercase form is not a stopword
    Stopwords,
    /// Token passes if it is tagged as an adjective, noun or verb
    Tagged,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for TextRank extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRankConfig {
    /// Damping factor (probability of following an edge)
    pub damping: f64,
    /// Safety bound on convergence sweeps
    pub max_iterations: usize,
    /// Stop once the mean relative score change drops below this
    pub convergence_threshold: f64,
    /// How node scores are seeded
    pub initial_scores: InitialScores,
    /// Number of ranked units to return (None = all)
    pub top_n: Option<usize>,
    /// Language code for the built-in stopword list
    pub language: String,
    /// Additional stopwords extending the built-in list
    pub stopwords: Vec<String>,
    /// Filter for the sentence graph
    pub sentence_filter: FilterMode,
    /// Filter for the keyword graph (None = tagged when the pipeline tags tokens)
    pub keyword_filter: Option<FilterMode>,
    /// Co-occurrence window for the keyword graph
    pub window_size: usize,
    /// Return an error instead of a best-effort ranking when the bound is hit
    pub strict_convergence: bool,
    /// Unit count from which the similarity graph is built in parallel
    pub parallel_threshold: usize,
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-4,
            initial_scores: InitialScores::default(),
            top_n: None,
            language: "en".to_string(),
            stopwords: Vec::new(),
            sentence_filter: FilterMode::Stopwords,
            keyword_filter: None,
            window_size: 2,
            strict_convergence: false,
            parallel_threshold: 64,
        }
    }
}

impl TextRankConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TextRankConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // At 1.0 isolated nodes would score zero
        if !(0.0..1.0).contains(&self.damping) {
            return Err(TextRankError::invalid_config(format!(
                "damping must be in [0, 1), got {}",
                self.damping
            )));
        }

        if self.max_iterations == 0 {
            return Err(TextRankError::invalid_config("max_iterations must be > 0"));
        }

        if !(self.convergence_threshold > 0.0 && self.convergence_threshold.is_finite()) {
            return Err(TextRankError::invalid_config(
                "convergence_threshold must be > 0",
            ));
        }

        if self.window_size < 2 {
            return Err(TextRankError::invalid_config("window_size must be >= 2"));
        }

        self.initial_scores.validate()
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set max iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Builder method: set the initial score strategy
    pub fn with_initial_scores(mut self, initial_scores: InitialScores) -> Self {
        self.initial_scores = initial_scores;
        self
    }

    /// Builder method: set top N units to return
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Builder method: set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder method: add extra stopwords
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Builder method: set the sentence filter mode
    pub fn with_sentence_filter(mut self, mode: FilterMode) -> Self {
        self.sentence_filter = mode;
        self
    }

    /// Builder method: force a keyword filter mode
    pub fn with_keyword_filter(mut self, mode: FilterMode) -> Self {
        self.keyword_filter = Some(mode);
        self
    }

    /// Builder method: set co-occurrence window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Builder method: fail on non-convergence
    pub fn with_strict_convergence(mut self, strict: bool) -> Self {
        self.strict_convergence = strict;
        self
    }

    /// Builder method: set the parallel build threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penn_tags() {
        assert_eq!(PosTag::from_penn("NN"), PosTag::Noun);
        assert_eq!(PosTag::from_penn("NNS"), PosTag::Noun);
        assert_eq!(PosTag::from_penn("NNPS"), PosTag::ProperNoun);
        assert_eq!(PosTag::from_penn("JJR"), PosTag::Adjective);
        assert_eq!(PosTag::from_penn("VBD"), PosTag::Verb);
        assert_eq!(PosTag::from_penn("DT"), PosTag::Determiner);
        assert_eq!(PosTag::from_penn("."), PosTag::Punctuation);
        assert_eq!(PosTag::from_penn("FW"), PosTag::Other);
    }

    #[test]
    fn test_parse_either_tag_set() {
        assert_eq!(PosTag::parse("PROPN"), PosTag::ProperNoun);
        assert_eq!(PosTag::parse("adj"), PosTag::Adjective);
        assert_eq!(PosTag::parse("VBZ"), PosTag::Verb);
        assert_eq!(PosTag::parse("X"), PosTag::Other);
        assert!(PosTag::parse("NNS").is_content_word());
        assert!(!PosTag::parse("IN").is_content_word());
    }

    #[test]
    fn test_modals_and_auxiliaries_are_not_content_words() {
        assert_eq!(PosTag::parse("MD"), PosTag::Auxiliary);
        assert_eq!(PosTag::parse("AUX"), PosTag::Auxiliary);
        assert!(!PosTag::parse("MD").is_content_word());
        assert!(!PosTag::parse("AUX").is_content_word());
        assert!(PosTag::parse("VBZ").is_content_word());
    }

    #[test]
    fn test_constant_initial_scores() {
        let scores = InitialScores::constant(1.0).generate(4);
        assert_eq!(scores, vec![1.0; 4]);
    }

    #[test]
    fn test_uniform_initial_scores_in_range() {
        let scores = InitialScores::default().generate(500);
        assert_eq!(scores.len(), 500);
        assert!(scores.iter().all(|&s| s > 0.0 && s <= 10.0));
    }

    #[test]
    fn test_seeded_initial_scores_reproducible() {
        let a = InitialScores::seeded(10.0, 42).generate(16);
        let b = InitialScores::seeded(10.0, 42).generate(16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_validation() {
        let config = TextRankConfig::default();
        assert!(config.validate().is_ok());

        let bad_config = TextRankConfig::default().with_damping(1.5);
        assert!(bad_config.validate().is_err());

        let bad_config = TextRankConfig::default().with_damping(1.0);
        assert!(bad_config.validate().is_err());

        let bad_config = TextRankConfig::default().with_max_iterations(0);
        assert!(bad_config.validate().is_err());

        let bad_config = TextRankConfig::default().with_convergence_threshold(0.0);
        assert!(bad_config.validate().is_err());

        let bad_config = TextRankConfig::default().with_window_size(1);
        assert!(bad_config.validate().is_err());

        let bad_config =
            TextRankConfig::default().with_initial_scores(InitialScores::constant(0.0));
        assert!(bad_config.validate().is_err());
    }

    #[test]
    fn test_config_from_json_fills_defaults() {
        let config = TextRankConfig::from_json(
            r#"{"damping": 0.9, "initial_scores": {"kind": "constant", "value": 1.0}}"#,
        )
        .unwrap();

        assert!((config.damping - 0.9).abs() < 1e-12);
        assert_eq!(config.initial_scores, InitialScores::constant(1.0));
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.sentence_filter, FilterMode::Stopwords);
    }

    #[test]
    fn test_config_from_json_rejects_invalid() {
        assert!(TextRankConfig::from_json(r#"{"damping": 2.0}"#).is_err());
        assert!(matches!(
            TextRankConfig::from_json("not json"),
            Err(TextRankError::Config(_))
        ));
    }

    #[test]
    fn test_feature_token_normalized() {
        let token = FeatureToken::tagged("Kelly", PosTag::ProperNoun);
        assert_eq!(token.normalized(), "kelly");
        assert_eq!(token.pos, Some(PosTag::ProperNoun));
    }
}
