//! Graph construction and representation
//!
//! This module provides graph building and storage for both ranking modes:
//! the sentence similarity graph and the keyword co-occurrence graph. Both
//! produce a [`SimilarityGraph`], which is what the convergence engine and
//! the ranker consume.

pub mod builder;
pub mod cooccurrence;
pub mod csr;
pub mod similarity;

use crate::types::TextUnit;
use csr::CsrGraph;

/// Text units plus their symmetric weighted adjacency.
///
/// Built fresh for every extraction and owned by the caller. Invariants: one
/// node per unit in input order, no self-loops, at most one edge per pair,
/// every stored weight strictly positive.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    units: Vec<TextUnit>,
    adjacency: CsrGraph,
}

impl SimilarityGraph {
    pub(crate) fn new(units: Vec<TextUnit>, adjacency: CsrGraph) -> Self {
        debug_assert_eq!(units.len(), adjacency.num_nodes);
        Self { units, adjacency }
    }

    /// Nodes, in input order
    pub fn units(&self) -> &[TextUnit] {
        &self.units
    }

    pub(crate) fn units_mut(&mut self) -> &mut [TextUnit] {
        &mut self.units
    }

    /// Consume the graph, keeping its units
    pub fn into_units(self) -> Vec<TextUnit> {
        self.units
    }

    /// The CSR adjacency
    pub fn adjacency(&self) -> &CsrGraph {
        &self.adjacency
    }

    /// Current node scores, in input order
    pub fn scores(&self) -> Vec<f64> {
        self.units.iter().map(|u| u.score).collect()
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.units.len()
    }

    /// Number of undirected edges
    pub fn num_edges(&self) -> usize {
        self.adjacency.num_edges()
    }

    /// Weight of the edge between nodes `a` and `b`, if any
    pub fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        if a >= self.num_nodes() || b >= self.num_nodes() {
            return None;
        }
        self.adjacency.edge_weight(a as u32, b as u32)
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
