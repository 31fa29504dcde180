//! Pipeline runner: drives the extraction stages in order.
//!
//! [`TextRank`] holds the read-only state shared by every extraction (config,
//! stopword list, NLP collaborator). Each call builds its own graph, converges
//! it, ranks it and drops it, so one engine can serve concurrent callers.
//!
//! Stages run in order:
//! 1. Segment (split sentences, tokenize)
//! 2. Build graph (sentence similarity or keyword co-occurrence)
//! 3. Converge scores
//! 4. Rank

use std::sync::Arc;

use serde::Serialize;

use crate::errors::Result;
use crate::graph::cooccurrence::build_keyword_graph;
use crate::graph::similarity::SimilarityGraphBuilder;
use crate::graph::SimilarityGraph;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::nlp::{FilterPolicy, NlpPipeline};
use crate::pagerank::converge;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_CONVERGE,
    STAGE_GRAPH, STAGE_RANK, STAGE_SEGMENT,
};
use crate::rank::rank_into;
use crate::summarizer::summary::Summary;
use crate::types::{FeatureToken, FilterMode, TextRankConfig, TextUnit};

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Ranked output of one extraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    /// Units by descending score, truncated to `top_n`
    pub units: Vec<TextUnit>,
    /// Convergence sweeps performed
    pub iterations: usize,
    /// Mean relative error of the last sweep
    pub delta: f64,
    /// Whether the scores settled below the threshold
    pub converged: bool,
}

impl Extraction {
    /// Result for input with no text units
    pub fn empty() -> Self {
        Self {
            units: Vec::new(),
            iterations: 0,
            delta: 0.0,
            converged: true,
        }
    }

    /// Check if nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Surface texts, best first
    pub fn texts(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.text.as_str()).collect()
    }
}

/// TextRank sentence and keyword extractor
#[derive(Debug, Clone)]
pub struct TextRank<N = Tokenizer> {
    config: TextRankConfig,
    stopwords: Arc<StopwordFilter>,
    nlp: N,
}

impl TextRank<Tokenizer> {
    /// Create an extractor using the built-in tokenizer
    pub fn new(config: TextRankConfig) -> Result<Self> {
        Self::with_pipeline(config, Tokenizer::new())
    }
}

impl<N: NlpPipeline> TextRank<N> {
    /// Create an extractor around a caller-supplied NLP pipeline
    ///
    /// The stopword list is built here, once, from `config.language` plus
    /// `config.stopwords`.
    pub fn with_pipeline(config: TextRankConfig, nlp: N) -> Result<Self> {
        config.validate()?;
        let stopwords = Arc::new(StopwordFilter::with_additional(
            &config.language,
            &config.stopwords,
        ));
        Ok(Self {
            config,
            stopwords,
            nlp,
        })
    }

    /// Share an already-loaded stopword filter instead of the config's list
    pub fn with_stopwords(mut self, stopwords: Arc<StopwordFilter>) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn config(&self) -> &TextRankConfig {
        &self.config
    }

    pub fn stopwords(&self) -> &Arc<StopwordFilter> {
        &self.stopwords
    }

    /// Rank the sentences of `text`
    pub fn extract_sentences(&self, text: &str) -> Result<Extraction> {
        self.extract_sentences_with_observer(text, &mut NoopObserver)
    }

    /// Rank the sentences of `text`, reporting each stage to `observer`
    pub fn extract_sentences_with_observer(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<Extraction> {
        self.rank_sentences(text, observer, self.top_k())
    }

    fn rank_sentences(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
        top_k: usize,
    ) -> Result<Extraction> {
        let units = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let clock = StageClock::start();
            let units: Vec<TextUnit> = self
                .nlp
                .split_sentences(text)
                .into_iter()
                .enumerate()
                .map(|(i, sentence)| {
                    let features = self.nlp.tokenize(&sentence);
                    TextUnit::new(i, sentence, features)
                })
                .collect();
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(units.len())
                .build();
            observer.on_stage_end(STAGE_SEGMENT, &report);
            units
        };

        if units.is_empty() {
            tracing::debug!("no sentences found");
            return Ok(Extraction::empty());
        }

        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let policy = self.policy(self.config.sentence_filter);
            let graph = SimilarityGraphBuilder::new()
                .with_parallel_threshold(self.config.parallel_threshold)
                .build(units, &policy);
            self.finish_graph_stage(clock, &graph, observer);
            graph
        };

        self.rank_graph(graph, observer, top_k)
    }

    /// Rank the keywords of `text`
    pub fn extract_keywords(&self, text: &str) -> Result<Extraction> {
        self.extract_keywords_with_observer(text, &mut NoopObserver)
    }

    /// Rank the keywords of `text`, reporting each stage to `observer`
    pub fn extract_keywords_with_observer(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<Extraction> {
        let sentences = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let clock = StageClock::start();
            let sentences: Vec<Vec<FeatureToken>> = self
                .nlp
                .split_sentences(text)
                .iter()
                .map(|s| self.nlp.tokenize(s))
                .collect();
            observer.on_stage_end(STAGE_SEGMENT, &StageReport::new(clock.elapsed()));
            sentences
        };

        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let policy = self.policy(self.keyword_filter());
            let graph = build_keyword_graph(&sentences, &policy, self.config.window_size);
            self.finish_graph_stage(clock, &graph, observer);
            graph
        };

        if graph.is_empty() {
            tracing::debug!("no keyword candidates found");
            return Ok(Extraction::empty());
        }

        self.rank_graph(graph, observer, self.top_k())
    }

    /// Top `k` sentences of `text` in document order
    ///
    /// `k` replaces `config.top_n` for this call.
    pub fn summarize(&self, text: &str, k: usize) -> Result<Summary> {
        let extraction = self.rank_sentences(text, &mut NoopObserver, k)?;
        Ok(Summary::from_ranking(extraction.units, k))
    }

    /// Filter used for keyword candidates
    pub fn keyword_filter(&self) -> FilterMode {
        self.config.keyword_filter.unwrap_or(if self.nlp.provides_tags() {
            FilterMode::Tagged
        } else {
            FilterMode::Stopwords
        })
    }

    fn top_k(&self) -> usize {
        self.config.top_n.unwrap_or(usize::MAX)
    }

    fn policy(&self, mode: FilterMode) -> FilterPolicy {
        match mode {
            FilterMode::Stopwords => FilterPolicy::stopwords(Arc::clone(&self.stopwords)),
            FilterMode::Tagged => FilterPolicy::Tagged,
        }
    }

    fn finish_graph_stage(
        &self,
        clock: StageClock,
        graph: &SimilarityGraph,
        observer: &mut impl PipelineObserver,
    ) {
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(graph.num_nodes())
            .edges(graph.num_edges())
            .build();
        observer.on_stage_end(STAGE_GRAPH, &report);
        observer.on_graph(graph);
    }

    fn rank_graph(
        &self,
        mut graph: SimilarityGraph,
        observer: &mut impl PipelineObserver,
        top_k: usize,
    ) -> Result<Extraction> {
        let convergence = {
            trace_stage!(STAGE_CONVERGE);
            observer.on_stage_start(STAGE_CONVERGE);
            let clock = StageClock::start();
            let convergence = converge(&mut graph, &self.config)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .iterations(convergence.iterations)
                .converged(convergence.converged)
                .build();
            observer.on_stage_end(STAGE_CONVERGE, &report);
            observer.on_convergence(&convergence);
            convergence
        };

        let units = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let units = rank_into(graph, top_k);
            observer.on_stage_end(STAGE_RANK, &StageReport::new(clock.elapsed()));
            units
        };

        Ok(Extraction {
            units,
            iterations: convergence.iterations,
            delta: convergence.delta,
            converged: convergence.converged,
        })
    }
}
