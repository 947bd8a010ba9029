//! Reading-pace analyzer.

use crate::align::AlignmentResult;
use crate::analyze::report::AnalyzerReport;
use crate::analyze::Analyzer;
use crate::error::Result;
use crate::recognition::SpeechSegment;
use crate::score::{fluency_fit, CompositeScore, ScoringConfig};

/// Judges words-per-minute against the optimal oral-reading band.
#[derive(Debug, Clone, Default)]
pub struct PaceAnalyzer {
    config: ScoringConfig,
}

impl PaceAnalyzer {
    /// Creates a pace analyzer using the given band configuration.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }
}

impl Analyzer for PaceAnalyzer {
    fn name(&self) -> &'static str {
        "pace"
    }

    fn analyze(
        &self,
        segment: &SpeechSegment,
        _alignment: &AlignmentResult,
        score: &CompositeScore,
    ) -> Result<AnalyzerReport> {
        if segment.token_count() == 0 {
            return Ok(AnalyzerReport::unknown(
                self.name(),
                vec!["No words were heard in this segment.".to_string()],
            ));
        }

        let wpm = score.fluency_wpm;
        let fit = fluency_fit(&self.config, wpm);

        let mut recommendations = Vec::new();
        if score.pace_out_of_range {
            recommendations
                .push("The measured pace was implausible; timing may be off.".to_string());
        } else if wpm < self.config.optimal_wpm_min {
            recommendations.push(format!(
                "Try reading a little faster — about {:.0} words per minute now, {:.0} is a comfortable floor.",
                wpm, self.config.optimal_wpm_min
            ));
        } else if wpm > self.config.optimal_wpm_max {
            recommendations.push(format!(
                "Try slowing down — about {:.0} words per minute now, aim for under {:.0}.",
                wpm, self.config.optimal_wpm_max
            ));
        }

        Ok(AnalyzerReport::scored(self.name(), fit, recommendations))
    }
}
