//! Score convergence
//!
//! This module runs the TextRank fixed-point iteration over a
//! [`SimilarityGraph`] and writes the converged scores back into its units.
//! The engine only needs node scores, neighbor sets and edge weights, so the
//! sentence and keyword graphs share it.

pub mod standard;

use serde::Serialize;

use crate::errors::{Result, TextRankError};
use crate::graph::SimilarityGraph;
use crate::rank::ranked_indices;
use crate::types::TextRankConfig;
use standard::StandardPageRank;

/// Result of a convergence run over a CSR graph
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Mean relative error of the last sweep
    pub delta: f64,
    /// Whether the error dropped below the threshold
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get top N nodes by score, ties in node order
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        ranked_indices(&self.scores)
            .into_iter()
            .take(n)
            .map(|i| (i as u32, self.scores[i]))
            .collect()
    }

    /// Convergence diagnostics without the scores
    pub fn report(&self) -> ConvergenceReport {
        ConvergenceReport {
            iterations: self.iterations,
            delta: self.delta,
            converged: self.converged,
        }
    }
}

/// Convergence diagnostics for one extraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceReport {
    /// Number of sweeps performed
    pub iterations: usize,
    /// Mean relative error of the last sweep
    pub delta: f64,
    /// Whether the error dropped below the threshold
    pub converged: bool,
}

/// Converge the scores of `graph` in place
///
/// The config is validated first. Scores are seeded from
/// `config.initial_scores`. Hitting `config.max_iterations` keeps the
/// best-effort scores and reports `converged: false`, unless
/// `config.strict_convergence` is set, in which case it is a
/// [`TextRankError::NonConvergence`] error.
pub fn converge(graph: &mut SimilarityGraph, config: &TextRankConfig) -> Result<ConvergenceReport> {
    config.validate()?;

    let engine = StandardPageRank::from_config(config);
    let initial = config.initial_scores.generate(graph.num_nodes());
    let result = engine.run_from(graph.adjacency(), initial)?;

    for (unit, score) in graph.units_mut().iter_mut().zip(&result.scores) {
        unit.score = *score;
    }

    if result.converged {
        tracing::debug!(
            iterations = result.iterations,
            delta = result.delta,
            "scores converged"
        );
        return Ok(result.report());
    }

    tracing::warn!(
        iterations = result.iterations,
        delta = result.delta,
        threshold = config.convergence_threshold,
        strict = config.strict_convergence,
        "scores did not converge within the iteration bound"
    );

    if config.strict_convergence {
        return Err(TextRankError::NonConvergence {
            iterations: result.iterations,
            delta: result.delta,
        });
    }

    Ok(result.report())
}
