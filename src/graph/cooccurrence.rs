//! Keyword co-occurrence graph
//!
//! Nodes are distinct lowercase forms of the tokens that pass the keyword
//! filter, in first-occurrence order. Two forms are linked with a weight equal
//! to the number of times they appear within `window_size` filtered tokens of
//! each other inside one sentence. Windows never cross sentence boundaries.

use super::builder::GraphBuilder;
use super::csr::CsrGraph;
use super::SimilarityGraph;
use crate::nlp::FilterPolicy;
use crate::types::{FeatureToken, TextUnit};

/// Build the keyword graph from tokenized sentences
pub fn build_keyword_graph(
    sentences: &[Vec<FeatureToken>],
    policy: &FilterPolicy,
    window_size: usize,
) -> SimilarityGraph {
    let mut builder = GraphBuilder::new();
    let mut units: Vec<TextUnit> = Vec::new();

    for sentence in sentences {
        // Filter to keyword candidates, creating nodes on first sight
        let candidates: Vec<u32> = sentence
            .iter()
            .filter(|t| policy.passes(t))
            .map(|token| {
                let id = builder.get_or_create_node(&token.normalized());
                if id as usize == units.len() {
                    units.push(TextUnit::new(
                        units.len(),
                        token.text.clone(),
                        vec![token.clone()],
                    ));
                }
                id
            })
            .collect();

        // Window extends forward
        for j in 0..candidates.len() {
            for k in (j + 1)..std::cmp::min(j + window_size, candidates.len()) {
                builder.increment_edge(candidates[j], candidates[k], 1.0);
            }
        }
    }

    let adjacency = CsrGraph::from_builder(&builder);

    tracing::debug!(
        nodes = adjacency.num_nodes,
        edges = adjacency.num_edges(),
        "built keyword co-occurrence graph"
    );

    SimilarityGraph::new(units, adjacency)
}
