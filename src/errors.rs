//! Error types for sentrank
//!
//! Empty input and fully disconnected graphs are not errors; they produce
//! empty or flat rankings. Everything here is fatal to a single extraction
//! call only.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, TextRankError>;

/// Errors produced while configuring or running an extraction
#[derive(Debug, Error)]
pub enum TextRankError {
    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The graph violates an invariant the convergence engine relies on
    #[error("invalid graph at node {node}: {reason}")]
    InvalidGraph { node: usize, reason: String },

    /// The iteration ceiling was reached before the scores settled
    #[error("scores did not converge after {iterations} iterations (mean relative error {delta:.6})")]
    NonConvergence { iterations: usize, delta: f64 },

    /// The configuration document could not be parsed
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl TextRankError {
    /// Build an [`TextRankError::InvalidConfig`] error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        TextRankError::InvalidConfig(msg.into())
    }

    /// Build an [`TextRankError::InvalidGraph`] error
    pub fn invalid_graph(node: usize, reason: impl Into<String>) -> Self {
        TextRankError::InvalidGraph {
            node,
            reason: reason.into(),
        }
    }
}
