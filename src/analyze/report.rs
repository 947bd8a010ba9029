//! Analyzer outputs and failure reporting.

use serde::{Deserialize, Serialize};

/// Advisory output of one secondary analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerReport {
    /// Analyzer name, stable across sessions.
    pub name: String,
    /// Sub-score in `[0, 1]`, or `None` when the analyzer has too little
    /// evidence to say anything — unknown is reported as unknown, never as
    /// a fabricated number.
    pub sub_score: Option<f32>,
    /// Human-readable suggestions for the reader.
    pub recommendations: Vec<String>,
}

impl AnalyzerReport {
    /// Creates a report with a known sub-score.
    pub fn scored(name: &str, sub_score: f32, recommendations: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            sub_score: Some(sub_score.clamp(0.0, 1.0)),
            recommendations,
        }
    }

    /// Creates an "unknown" report: no score, optionally a note.
    pub fn unknown(name: &str, recommendations: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            sub_score: None,
            recommendations,
        }
    }
}

/// What one analyzer produced for a segment: a report, or an isolated
/// failure that was excluded from aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalyzerOutcome {
    Report(AnalyzerReport),
    Failure { name: String, message: String },
}

impl AnalyzerOutcome {
    /// The analyzer name, whichever way the run went.
    pub fn name(&self) -> &str {
        match self {
            AnalyzerOutcome::Report(report) => &report.name,
            AnalyzerOutcome::Failure { name, .. } => name,
        }
    }

    /// The report, when the analyzer succeeded.
    pub fn report(&self) -> Option<&AnalyzerReport> {
        match self {
            AnalyzerOutcome::Report(report) => Some(report),
            AnalyzerOutcome::Failure { .. } => None,
        }
    }
}

/// Trait for reporting isolated analyzer failures.
pub trait FailureReporter: Send + Sync {
    /// Reports a failure from an analyzer.
    fn report(&self, analyzer: &str, message: &str);
}

/// Simple failure reporter that logs to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn report(&self, analyzer: &str, message: &str) {
        eprintln!("readalign: analyzer '{}' failed: {}", analyzer, message);
    }
}
