//! Pipeline observer hooks for stage timing and inspection.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic: timing stages, capturing the built graph, or inspecting
//! convergence diagnostics.

use std::time::{Duration, Instant};

use crate::graph::SimilarityGraph;
use crate::pagerank::ConvergenceReport;

/// Sentence splitting and tokenization
pub const STAGE_SEGMENT: &str = "segment";
/// Similarity or co-occurrence graph construction
pub const STAGE_GRAPH: &str = "graph";
/// Score convergence
pub const STAGE_CONVERGE: &str = "converge";
/// Ordering and top-K selection
pub const STAGE_RANK: &str = "rank";

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    /// Start timing
    pub fn start() -> Self {
        Self(Instant::now())
    }

    /// Time since [`StageClock::start`]
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What happened during one stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    pub iterations: Option<usize>,
    pub converged: Option<bool>,
}

impl StageReport {
    /// A report carrying only the elapsed time
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }
}

/// Builder for [`StageReport`]s with optional graph or convergence details
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks fired by [`crate::pipeline::runner::TextRank`] at each stage.
///
/// Every method has an empty default, so implementors override only what they
/// need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// The graph as built, before convergence
    fn on_graph(&mut self, _graph: &SimilarityGraph) {}

    fn on_convergence(&mut self, _report: &ConvergenceReport) {}
}

/// Observer that ignores every callback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every finished stage, in order
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    stages: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded stages, in completion order
    pub fn stages(&self) -> &[(&'static str, StageReport)] {
        &self.stages
    }

    /// Report for a stage, if it ran
    pub fn get(&self, stage: &str) -> Option<&StageReport> {
        self.stages
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Sum of all recorded stage durations
    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.stages.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .nodes(4)
            .edges(2)
            .build();

        assert_eq!(report.elapsed, Duration::from_millis(3));
        assert_eq!(report.nodes, Some(4));
        assert_eq!(report.edges, Some(2));
        assert_eq!(report.iterations, None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_start(STAGE_SEGMENT);
        obs.on_stage_end(STAGE_SEGMENT, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_GRAPH, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<_> = obs.stages().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_SEGMENT, STAGE_GRAPH]);
        assert_eq!(obs.total_duration(), Duration::from_millis(3));
        assert!(obs.get(STAGE_RANK).is_none());
    }

    #[test]
    fn test_stage_clock_monotonic() {
        let clock = StageClock::start();
        let first = clock.elapsed();
        assert!(clock.elapsed() >= first);
    }
}
