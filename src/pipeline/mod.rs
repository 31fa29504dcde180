//! Extraction pipeline
//!
//! [`runner::TextRank`] drives segmentation, graph construction, convergence
//! and ranking. [`observer`] exposes hooks at each stage boundary.

pub mod observer;
pub mod runner;
