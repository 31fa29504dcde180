//! Ranking of converged graphs
//!
//! Units are ordered by descending score with a stable sort, so units with
//! equal scores keep their input order.

use crate::graph::SimilarityGraph;
use crate::types::TextUnit;

/// Node indices ordered by descending score, ties in index order
pub fn ranked_indices(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // `sort_by` is stable
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// The `top_k` highest-scoring units of `graph`
///
/// Asking for more units than the graph holds returns all of them.
pub fn rank(graph: &SimilarityGraph, top_k: usize) -> Vec<TextUnit> {
    let units = graph.units();
    ranked_indices(&graph.scores())
        .into_iter()
        .take(top_k)
        .map(|i| units[i].clone())
        .collect()
}

/// Like [`rank`], but consumes the graph instead of cloning its units
pub fn rank_into(graph: SimilarityGraph, top_k: usize) -> Vec<TextUnit> {
    let order = ranked_indices(&graph.scores());
    let mut slots: Vec<Option<TextUnit>> = graph.into_units().into_iter().map(Some).collect();
    order
        .into_iter()
        .take(top_k)
        .filter_map(|i| slots[i].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::graph::csr::CsrGraph;

    fn scored_graph(scores: &[f64]) -> SimilarityGraph {
        let mut builder = GraphBuilder::new();
        let units = scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                builder.add_node();
                let mut unit = TextUnit::new(i, format!("unit {i}"), Vec::new());
                unit.score = s;
                unit
            })
            .collect();
        SimilarityGraph::new(units, CsrGraph::from_builder(&builder))
    }

    #[test]
    fn test_descending_order() {
        assert_eq!(ranked_indices(&[0.2, 0.9, 0.5]), vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        assert_eq!(ranked_indices(&[0.5, 1.0, 0.5, 1.0, 0.5]), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_rank_top_k() {
        let graph = scored_graph(&[0.15, 1.0, 0.6]);
        let ranked = rank(&graph, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].index, 1);
        assert_eq!(ranked[1].index, 2);
    }

    #[test]
    fn test_rank_more_than_available() {
        let graph = scored_graph(&[0.15, 1.0]);
        assert_eq!(rank(&graph, 10).len(), 2);
    }

    #[test]
    fn test_rank_zero_and_empty() {
        assert!(rank(&scored_graph(&[1.0, 2.0]), 0).is_empty());
        assert!(rank(&scored_graph(&[]), 5).is_empty());
    }

    #[test]
    fn test_rank_into_matches_rank() {
        let graph = scored_graph(&[0.3, 0.3, 0.9, 0.1]);
        let borrowed = rank(&graph, 3);
        let owned = rank_into(graph, 3);

        assert_eq!(borrowed, owned);
    }
}
