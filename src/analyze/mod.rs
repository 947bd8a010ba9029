//! Secondary analyzer pipeline.
//!
//! Analyzers contribute advisory sub-scores on top of the primary
//! composite score. Each runs in isolation: a failing or panicking
//! analyzer becomes a `Failure` entry and is skipped, never blocking
//! delivery of the primary result.

pub mod confidence;
pub mod pace;
pub mod pronunciation;
pub mod report;

pub use confidence::ConfidenceFusionAnalyzer;
pub use pace::PaceAnalyzer;
pub use pronunciation::PronunciationPatternAnalyzer;
pub use report::{AnalyzerOutcome, AnalyzerReport, FailureReporter, LogReporter};

use crate::align::AlignmentResult;
use crate::error::Result;
use crate::recognition::SpeechSegment;
use crate::score::{CompositeScore, ScoringConfig};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A secondary analyzer over one scored segment.
///
/// Implementations must be pure with respect to session state: same
/// segment, alignment, and score in, same report out.
pub trait Analyzer: Send {
    /// Stable name used in outcomes and failure reports.
    fn name(&self) -> &'static str;

    /// Produces an advisory report for the segment.
    fn analyze(
        &self,
        segment: &SpeechSegment,
        alignment: &AlignmentResult,
        score: &CompositeScore,
    ) -> Result<AnalyzerReport>;
}

/// Runs a set of independent analyzers over scored segments.
pub struct AnalyzerPipeline {
    analyzers: Vec<Box<dyn Analyzer>>,
    reporter: Arc<dyn FailureReporter>,
}

impl AnalyzerPipeline {
    /// Creates a pipeline over the given analyzers with stderr failure
    /// logging.
    pub fn new(analyzers: Vec<Box<dyn Analyzer>>) -> Self {
        Self {
            analyzers,
            reporter: Arc::new(LogReporter),
        }
    }

    /// Creates the stock pipeline: pace, confidence fusion, pronunciation
    /// pattern.
    pub fn standard(scoring: ScoringConfig) -> Self {
        Self::new(vec![
            Box::new(PaceAnalyzer::new(scoring)),
            Box::new(ConfidenceFusionAnalyzer::new()),
            Box::new(PronunciationPatternAnalyzer::new()),
        ])
    }

    /// Creates a pipeline with no analyzers.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Sets a custom failure reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Number of registered analyzers.
    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    /// True when no analyzers are registered.
    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Runs every analyzer over the segment, in registration order.
    ///
    /// An analyzer error or panic is converted to a `Failure` outcome and
    /// reported; remaining analyzers still run.
    pub fn run(
        &self,
        segment: &SpeechSegment,
        alignment: &AlignmentResult,
        score: &CompositeScore,
    ) -> Vec<AnalyzerOutcome> {
        let mut outcomes = Vec::with_capacity(self.analyzers.len());
        for analyzer in &self.analyzers {
            let name = analyzer.name();
            let run = panic::catch_unwind(AssertUnwindSafe(|| {
                analyzer.analyze(segment, alignment, score)
            }));
            let outcome = match run {
                Ok(Ok(report)) => AnalyzerOutcome::Report(report),
                Ok(Err(error)) => {
                    let message = error.to_string();
                    self.reporter.report(name, &message);
                    AnalyzerOutcome::Failure {
                        name: name.to_string(),
                        message,
                    }
                }
                Err(panic_info) => {
                    let message = panic_info
                        .downcast_ref::<&str>()
                        .copied()
                        .or_else(|| panic_info.downcast_ref::<String>().map(|s| s.as_str()))
                        .unwrap_or("unknown panic")
                        .to_string();
                    self.reporter.report(name, &message);
                    AnalyzerOutcome::Failure {
                        name: name.to_string(),
                        message,
                    }
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}
