//! TextRank score iteration
//!
//! Implements the unnormalized TextRank update
//!
//! ```text
//! s(i) = (1 - d) + d * Σ_{j ∈ N(i)} w(j,i) / W(j) * s(j)
//! ```
//!
//! where `W(j)` is the total edge weight of `j`. Updates are synchronous: each
//! sweep reads only the previous sweep's scores. A sweep's error is the mean
//! relative change `Σ |new - old| / new / N`, recomputed from zero every sweep.

use super::PageRankResult;
use crate::errors::{Result, TextRankError};
use crate::graph::csr::CsrGraph;
use crate::types::TextRankConfig;

/// TextRank score convergence engine
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of sweeps
    pub max_iterations: usize,
    /// Convergence threshold on the mean relative error
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-4,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take damping, bound and threshold from a config
    pub fn from_config(config: &TextRankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            threshold: config.convergence_threshold,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Score every isolated node receives
    pub fn teleport(&self) -> f64 {
        1.0 - self.damping
    }

    /// Run to convergence starting from `initial`
    ///
    /// Returns the result even if convergence wasn't achieved, with
    /// `converged=false`. Fails only on a malformed graph or seed.
    pub fn run_from(&self, graph: &CsrGraph, initial: Vec<f64>) -> Result<PageRankResult> {
        let n = graph.num_nodes;
        if initial.len() != n {
            return Err(TextRankError::invalid_graph(
                initial.len().min(n),
                format!("{} initial scores for {} nodes", initial.len(), n),
            ));
        }
        if n == 0 {
            return Ok(PageRankResult::new(Vec::new(), 0, 0.0, true));
        }
        if let Some(node) = initial.iter().position(|s| !(*s > 0.0 && s.is_finite())) {
            return Err(TextRankError::invalid_graph(
                node,
                format!("initial score {} is not strictly positive", initial[node]),
            ));
        }

        // With no edges every sum is empty: one sweep reaches the fixed point.
        if graph.num_edges() == 0 {
            return Ok(PageRankResult::new(vec![self.teleport(); n], 1, 0.0, true));
        }

        let mut scores = initial;
        let mut new_scores = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = f64::MAX;
        let mut converged = false;

        while iterations < self.max_iterations {
            delta = self.sweep(graph, &scores, &mut new_scores)?;
            iterations += 1;

            // Swap buffers
            std::mem::swap(&mut scores, &mut new_scores);

            if delta < self.threshold {
                converged = true;
                break;
            }
        }

        Ok(PageRankResult::new(scores, iterations, delta, converged))
    }

    /// Run one synchronous sweep from `scores` into `out`
    ///
    /// Returns the mean relative error of the sweep.
    pub fn sweep(&self, graph: &CsrGraph, scores: &[f64], out: &mut [f64]) -> Result<f64> {
        let n = graph.num_nodes;
        let teleport = self.teleport();
        let mut error = 0.0;

        for node in 0..n {
            let mut sum = 0.0;
            for (neighbor, weight) in graph.neighbors(node as u32) {
                // `neighbor` has at least the edge back to `node`
                let total = graph.node_total_weight(neighbor);
                if !(total > 0.0 && total.is_finite()) {
                    return Err(TextRankError::invalid_graph(
                        neighbor as usize,
                        format!("total edge weight {} is not strictly positive", total),
                    ));
                }
                sum += weight / total * scores[neighbor as usize];
            }

            let score = teleport + self.damping * sum;
            error += (score - scores[node]).abs() / score;
            out[node] = score;
        }

        Ok(error / n as f64)
    }
}
