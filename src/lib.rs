//! # sentrank
//!
//! TextRank sentence and keyword extraction.
//!
//! Text is split into units (sentences, or distinct word forms), the units are
//! linked into a weighted undirected graph, and a damped fixed-point iteration
//! scores every node. Highly connected units rank first.
//!
//! ## Features
//!
//! - **Sentence ranking**: lexical-overlap similarity graph, normalized by
//!   sentence length
//! - **Keyword ranking**: sliding-window co-occurrence graph
//! - **Pluggable NLP**: bring your own sentence splitter, tokenizer and tagger
//!   through [`NlpPipeline`]
//! - **Reproducible**: seedable initial scores and a stable ranking order
//!
//! ```no_run
//! use sentrank::{TextRank, TextRankConfig};
//!
//! let engine = TextRank::new(TextRankConfig::default().with_top_n(3))?;
//! let extraction = engine.extract_sentences("Some text. More text.")?;
//! for unit in &extraction.units {
//!     println!("{:.3} {}", unit.score, unit.text);
//! }
//! # Ok::<(), sentrank::TextRankError>(())
//! ```

pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod rank;
pub mod summarizer;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, TextRankError};
pub use types::{FeatureToken, FilterMode, InitialScores, PosTag, TextRankConfig, TextUnit};

// Re-export main functionality
pub use graph::{
    builder::GraphBuilder, cooccurrence::build_keyword_graph, csr::CsrGraph,
    similarity::{build_similarity_graph, sentence_similarity, SimilarityGraphBuilder},
    SimilarityGraph,
};
pub use nlp::{stopwords::StopwordFilter, tokenizer::Tokenizer, FilterPolicy, NlpPipeline};
pub use pagerank::{converge, standard::StandardPageRank, ConvergenceReport, PageRankResult};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use pipeline::runner::{Extraction, TextRank};
pub use rank::{rank, rank_into};
pub use summarizer::summary::Summary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
