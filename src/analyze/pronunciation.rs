//! Pronunciation-pattern heuristic.
//!
//! Advisory only: a transcript-only hypothesis stream carries no phonetic
//! features, so this analyzer can at best surface recurring near-miss
//! substitutions for a teacher to look at. It reports unknown until it has
//! real evidence rather than inventing a number.

use crate::align::{AlignmentResult, MatchStatus};
use crate::analyze::report::AnalyzerReport;
use crate::analyze::Analyzer;
use crate::defaults;
use crate::error::Result;
use crate::recognition::SpeechSegment;
use crate::score::CompositeScore;

/// Cap on how many substitution examples end up in recommendations.
const MAX_EXAMPLES: usize = 3;

/// Surfaces recurring near-miss word substitutions in a segment.
#[derive(Debug, Clone)]
pub struct PronunciationPatternAnalyzer {
    min_evidence: usize,
}

impl PronunciationPatternAnalyzer {
    pub fn new() -> Self {
        Self {
            min_evidence: defaults::PATTERN_MIN_EVIDENCE,
        }
    }

    /// Overrides how many substitution pairs constitute enough evidence.
    pub fn with_min_evidence(mut self, min_evidence: usize) -> Self {
        self.min_evidence = min_evidence;
        self
    }
}

impl Default for PronunciationPatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for PronunciationPatternAnalyzer {
    fn name(&self) -> &'static str {
        "pronunciation"
    }

    fn analyze(
        &self,
        _segment: &SpeechSegment,
        alignment: &AlignmentResult,
        _score: &CompositeScore,
    ) -> Result<AnalyzerReport> {
        // Close and Similar entries are the near misses: the reader
        // attempted the word and the recognizer heard something adjacent.
        let near_misses: Vec<_> = alignment
            .matches()
            .iter()
            .filter(|m| matches!(m.status, MatchStatus::Close | MatchStatus::Similar))
            .collect();

        if near_misses.len() < self.min_evidence {
            return Ok(AnalyzerReport::unknown(self.name(), Vec::new()));
        }

        let mean_similarity = near_misses.iter().map(|m| m.similarity).sum::<f32>()
            / near_misses.len() as f32;

        let mut recommendations = Vec::new();
        for word_match in near_misses.iter().take(MAX_EXAMPLES) {
            if let (Some(spoken), Some(ref_index)) =
                (word_match.spoken_text.as_deref(), word_match.ref_index)
            {
                recommendations.push(format!(
                    "Word {} was heard as \"{}\" — worth practicing aloud.",
                    ref_index + 1,
                    spoken
                ));
            }
        }

        Ok(AnalyzerReport::scored(
            self.name(),
            mean_similarity,
            recommendations,
        ))
    }
}
