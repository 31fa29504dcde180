//! Sentence similarity graph
//!
//! Every unordered pair of sentences gets weight
//! `overlap / (ln|u| + ln|v|)`, where `overlap` counts equal token pairs that
//! pass the filter policy and `|u|` counts all tokens of the sentence.
//! Pairs with a non-positive weight get no edge.
//!
//! Each sentence's qualifying tokens are pre-counted, so the overlap of a pair
//! is `Σ count_u(t) · count_v(t)` rather than a nested token scan.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::builder::GraphBuilder;
use super::csr::CsrGraph;
use super::SimilarityGraph;
use crate::nlp::FilterPolicy;
use crate::types::TextUnit;

/// Qualifying token counts of one sentence
type TokenCounts<'a> = FxHashMap<&'a str, u32>;

/// Builds the sentence similarity graph
#[derive(Debug, Clone)]
pub struct SimilarityGraphBuilder {
    /// Unit count from which rows are scored in parallel
    parallel_threshold: usize,
}

impl Default for SimilarityGraphBuilder {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
        }
    }
}

impl SimilarityGraphBuilder {
    /// Create a builder with the default parallel threshold
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unit count from which pair scoring runs on the rayon pool
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Build the graph over `units`, keeping their order
    pub fn build(&self, units: Vec<TextUnit>, policy: &FilterPolicy) -> SimilarityGraph {
        let n = units.len();

        let rows: Vec<Vec<(u32, f64)>> = {
            let counts: Vec<TokenCounts<'_>> =
                units.iter().map(|u| qualifying_counts(u, policy)).collect();

            let row = |i: usize| -> Vec<(u32, f64)> {
                ((i + 1)..n)
                    .filter_map(|j| {
                        let w = weight(
                            &counts[i],
                            units[i].token_count(),
                            &counts[j],
                            units[j].token_count(),
                        );
                        (w > 0.0).then_some((j as u32, w))
                    })
                    .collect()
            };

            // Rows are collected in index order either way, so both paths
            // yield the same graph.
            if n >= self.parallel_threshold {
                (0..n).into_par_iter().map(row).collect()
            } else {
                (0..n).map(row).collect()
            }
        };

        let mut builder = GraphBuilder::with_capacity(n);
        for _ in 0..n {
            builder.add_node();
        }
        for (i, edges) in rows.into_iter().enumerate() {
            for (j, w) in edges {
                builder.increment_edge(i as u32, j, w);
            }
        }

        let adjacency = CsrGraph::from_builder(&builder);

        tracing::debug!(
            nodes = adjacency.num_nodes,
            edges = adjacency.num_edges(),
            "built sentence similarity graph"
        );

        SimilarityGraph::new(units, adjacency)
    }
}

/// Build the sentence similarity graph with default settings
pub fn build_similarity_graph(units: Vec<TextUnit>, policy: &FilterPolicy) -> SimilarityGraph {
    SimilarityGraphBuilder::new().build(units, policy)
}

/// Similarity weight between two units under `policy`
pub fn sentence_similarity(a: &TextUnit, b: &TextUnit, policy: &FilterPolicy) -> f64 {
    weight(
        &qualifying_counts(a, policy),
        a.token_count(),
        &qualifying_counts(b, policy),
        b.token_count(),
    )
}

fn qualifying_counts<'a>(unit: &'a TextUnit, policy: &FilterPolicy) -> TokenCounts<'a> {
    let mut counts = TokenCounts::default();
    for token in unit.features.iter().filter(|t| policy.passes(t)) {
        *counts.entry(token.text.as_str()).or_insert(0) += 1;
    }
    counts
}

fn overlap(a: &TokenCounts<'_>, b: &TokenCounts<'_>) -> u64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(token, &ca)| large.get(token).map(|&cb| ca as u64 * cb as u64))
        .sum()
}

fn weight(a: &TokenCounts<'_>, a_len: usize, b: &TokenCounts<'_>, b_len: usize) -> f64 {
    let shared = overlap(a, b);
    if shared == 0 {
        return 0.0;
    }

    // ln(1) + ln(1) = 0: two one-token sentences get no edge
    let denominator = (a_len as f64).ln() + (b_len as f64).ln();
    if denominator <= 0.0 {
        return 0.0;
    }

    let w = shared as f64 / denominator;
    if w.is_finite() {
        w
    } else {
        0.0
    }
}
