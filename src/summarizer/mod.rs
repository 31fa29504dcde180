//! Summarization components
//!
//! Extractive summaries built from a sentence ranking.

pub mod summary;
