//! Confidence-fusion analyzer.

use crate::align::AlignmentResult;
use crate::analyze::report::AnalyzerReport;
use crate::analyze::Analyzer;
use crate::error::Result;
use crate::recognition::SpeechSegment;
use crate::score::CompositeScore;

/// Sub-score below which the analyzer suggests checking the environment.
const LOW_RELIABILITY: f32 = 0.5;

/// Fuses recognizer confidence with alignment agreement into a single
/// reliability estimate for the segment.
///
/// When the recognizer is unsure AND the transcript disagrees with the
/// reference, neither accuracy nor confidence alone tells the caller
/// whether to trust the judgment; the fusion does.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceFusionAnalyzer;

impl ConfidenceFusionAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for ConfidenceFusionAnalyzer {
    fn name(&self) -> &'static str {
        "confidence"
    }

    fn analyze(
        &self,
        segment: &SpeechSegment,
        _alignment: &AlignmentResult,
        score: &CompositeScore,
    ) -> Result<AnalyzerReport> {
        if segment.token_count() == 0 {
            return Ok(AnalyzerReport::unknown(self.name(), Vec::new()));
        }

        // score.confidence already carries the alternative-consensus
        // penalty; blending with accuracy rewards segments where the
        // recognizer and the alignment agree.
        let reliability = 0.5 * score.confidence + 0.5 * score.accuracy;

        let mut recommendations = Vec::new();
        if reliability < LOW_RELIABILITY {
            recommendations.push(
                "Recognition was unreliable for this segment; a quieter environment may help."
                    .to_string(),
            );
        }

        Ok(AnalyzerReport::scored(
            self.name(),
            reliability,
            recommendations,
        ))
    }
}
