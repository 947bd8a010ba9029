//! Composite scoring of aligned speech segments.
//!
//! Fuses alignment accuracy, reading pace, and recognizer confidence into
//! one score per segment. Every weight and band is configuration, so a
//! caller can retune the blend without code changes.

use crate::align::AlignmentResult;
use crate::defaults;
use crate::error::{ReadAlignError, Result};
use crate::recognition::SpeechSegment;
use crate::text::{normalize_word, similarity};
use serde::{Deserialize, Serialize};

/// Weights and bands for composite scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of alignment accuracy in the overall score.
    pub accuracy_weight: f32,
    /// Weight of recognizer confidence in the overall score.
    pub confidence_weight: f32,
    /// Weight of fluency fit in the overall score.
    pub fluency_weight: f32,
    /// Lower bound of the optimal words-per-minute band.
    pub optimal_wpm_min: f32,
    /// Upper bound of the optimal words-per-minute band.
    pub optimal_wpm_max: f32,
    /// Ceiling for plausible words-per-minute values; beyond it the raw
    /// value is clamped and the score flagged.
    pub wpm_clamp_max: f32,
    /// Mean alternative similarity below which alternatives are considered
    /// to disagree with the primary transcript.
    pub consensus_floor: f32,
    /// Factor applied to confidence on low alternative consensus.
    pub consensus_penalty: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            accuracy_weight: defaults::ACCURACY_WEIGHT,
            confidence_weight: defaults::CONFIDENCE_WEIGHT,
            fluency_weight: defaults::FLUENCY_WEIGHT,
            optimal_wpm_min: defaults::OPTIMAL_WPM_MIN,
            optimal_wpm_max: defaults::OPTIMAL_WPM_MAX,
            wpm_clamp_max: defaults::WPM_CLAMP_MAX,
            consensus_floor: defaults::CONSENSUS_FLOOR,
            consensus_penalty: defaults::CONSENSUS_PENALTY,
        }
    }
}

impl ScoringConfig {
    /// Validates weights and bands.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("scoring.accuracy_weight", self.accuracy_weight),
            ("scoring.confidence_weight", self.confidence_weight),
            ("scoring.fluency_weight", self.fluency_weight),
        ] {
            if value < 0.0 {
                return Err(ReadAlignError::ConfigInvalidValue {
                    key: key.to_string(),
                    message: "must be non-negative".to_string(),
                });
            }
        }
        if self.accuracy_weight + self.confidence_weight + self.fluency_weight <= 0.0 {
            return Err(ReadAlignError::ConfigInvalidValue {
                key: "scoring".to_string(),
                message: "weights must not all be zero".to_string(),
            });
        }
        if self.optimal_wpm_min >= self.optimal_wpm_max
            || self.optimal_wpm_max >= self.wpm_clamp_max
        {
            return Err(ReadAlignError::ConfigInvalidValue {
                key: "scoring.optimal_wpm".to_string(),
                message: "band must satisfy min < max < clamp".to_string(),
            });
        }
        Ok(())
    }
}

/// Fused accuracy/fluency/confidence metrics for a segment or session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Fraction of reference tokens spoken correctly (Correct or Close).
    pub accuracy: f32,
    /// Reading pace, clamped to the configured sane range.
    pub fluency_wpm: f32,
    /// Recognizer confidence, penalized on low alternative consensus.
    pub confidence: f32,
    /// Weighted blend of the other components, always in `[0, 1]`.
    pub overall: f32,
    /// Set when the raw words-per-minute fell outside the sane range and
    /// was clamped rather than silently accepted.
    pub pace_out_of_range: bool,
}

/// How well a pace fits the optimal band: 1.0 inside the band, decaying
/// linearly to 0 toward standstill and toward the clamp ceiling.
pub fn fluency_fit(config: &ScoringConfig, wpm: f32) -> f32 {
    if wpm >= config.optimal_wpm_min && wpm <= config.optimal_wpm_max {
        1.0
    } else if wpm < config.optimal_wpm_min {
        (wpm / config.optimal_wpm_min).max(0.0)
    } else {
        let over = wpm - config.optimal_wpm_max;
        let range = config.wpm_clamp_max - config.optimal_wpm_max;
        (1.0 - over / range).max(0.0)
    }
}

/// Converts alignments into composite scores.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    /// Creates a scorer with the given configuration.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// The active scoring configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores one aligned segment.
    pub fn score(&self, alignment: &AlignmentResult, segment: &SpeechSegment) -> CompositeScore {
        let accuracy = if alignment.reference_len() == 0 {
            0.0
        } else {
            alignment.hit_count() as f32 / alignment.reference_len() as f32
        };

        let (fluency_wpm, pace_out_of_range) = self.clamped_wpm(segment);
        let confidence = self.adjusted_confidence(segment);
        let fit = fluency_fit(&self.config, fluency_wpm);

        let weight_total =
            self.config.accuracy_weight + self.config.confidence_weight + self.config.fluency_weight;
        let overall = ((self.config.accuracy_weight * accuracy
            + self.config.confidence_weight * confidence
            + self.config.fluency_weight * fit)
            / weight_total)
            .clamp(0.0, 1.0);

        CompositeScore {
            accuracy,
            fluency_wpm,
            confidence,
            overall,
            pace_out_of_range,
        }
    }

    /// Words per minute from token count and segment duration, clamped to
    /// the sane range. Out-of-range raw values are flagged, not hidden.
    fn clamped_wpm(&self, segment: &SpeechSegment) -> (f32, bool) {
        let token_count = segment.token_count();
        if segment.approximate_duration_ms == 0 {
            // No duration means no usable pace signal at all.
            return (0.0, token_count > 0);
        }
        let raw = token_count as f32 / segment.approximate_duration_ms as f32 * 60_000.0;
        let clamped = raw.clamp(0.0, self.config.wpm_clamp_max);
        (clamped, raw > self.config.wpm_clamp_max)
    }

    /// Recognizer confidence, penalized when the alternatives disagree
    /// strongly with the primary transcript.
    fn adjusted_confidence(&self, segment: &SpeechSegment) -> f32 {
        let hypothesis = &segment.hypothesis;
        if hypothesis.alternatives.is_empty() {
            return hypothesis.confidence;
        }

        let primary = normalized_text(&hypothesis.transcript_text);
        let consensus: f32 = hypothesis
            .alternatives
            .iter()
            .map(|alt| similarity(&primary, &normalized_text(&alt.text)))
            .sum::<f32>()
            / hypothesis.alternatives.len() as f32;

        if consensus < self.config.consensus_floor {
            hypothesis.confidence * self.config.consensus_penalty
        } else {
            hypothesis.confidence
        }
    }
}

/// Whole-transcript normalization for consensus comparison.
fn normalized_text(text: &str) -> String {
    text.split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
