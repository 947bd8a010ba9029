//! Cumulative session scoring.

use crate::score::scorer::CompositeScore;

/// Running length-weighted average of per-segment composite scores.
///
/// Weights are spoken-token counts, so a long sentence moves the session
/// score more than a two-word fragment.
#[derive(Debug, Clone, Default)]
pub struct SessionScore {
    accuracy_sum: f32,
    wpm_sum: f32,
    confidence_sum: f32,
    overall_sum: f32,
    weight_total: f32,
    any_pace_flag: bool,
    segments: usize,
}

impl SessionScore {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one segment score in with the given weight.
    ///
    /// A zero weight (empty hypothesis) still counts as a minimal
    /// contribution so silent segments drag the average down.
    pub fn record(&mut self, score: &CompositeScore, weight: usize) {
        let weight = weight.max(1) as f32;
        self.accuracy_sum += score.accuracy * weight;
        self.wpm_sum += score.fluency_wpm * weight;
        self.confidence_sum += score.confidence * weight;
        self.overall_sum += score.overall * weight;
        self.weight_total += weight;
        self.any_pace_flag |= score.pace_out_of_range;
        self.segments += 1;
    }

    /// Number of segments recorded.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// The cumulative score, or `None` before any segment was recorded.
    pub fn current(&self) -> Option<CompositeScore> {
        if self.segments == 0 {
            return None;
        }
        Some(CompositeScore {
            accuracy: self.accuracy_sum / self.weight_total,
            fluency_wpm: self.wpm_sum / self.weight_total,
            confidence: self.confidence_sum / self.weight_total,
            overall: self.overall_sum / self.weight_total,
            pace_out_of_range: self.any_pace_flag,
        })
    }

    /// Clears all recorded segments.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(accuracy: f32, overall: f32) -> CompositeScore {
        CompositeScore {
            accuracy,
            fluency_wpm: 150.0,
            confidence: 0.9,
            overall,
            pace_out_of_range: false,
        }
    }

    #[test]
    fn test_empty_tracker_has_no_score() {
        assert!(SessionScore::new().current().is_none());
        assert_eq!(SessionScore::new().segment_count(), 0);
    }

    #[test]
    fn test_single_segment_passes_through() {
        let mut session = SessionScore::new();
        session.record(&score(0.8, 0.75), 6);
        let current = session.current().expect("one segment recorded");
        assert_eq!(current.accuracy, 0.8);
        assert_eq!(current.overall, 0.75);
    }

    #[test]
    fn test_average_is_length_weighted() {
        let mut session = SessionScore::new();
        // 9 tokens at accuracy 1.0, 1 token at accuracy 0.0
        session.record(&score(1.0, 1.0), 9);
        session.record(&score(0.0, 0.0), 1);
        let current = session.current().expect("segments recorded");
        assert!((current.accuracy - 0.9).abs() < 1e-6, "got {}", current.accuracy);
        assert_eq!(session.segment_count(), 2);
    }

    #[test]
    fn test_zero_weight_counts_minimally() {
        let mut session = SessionScore::new();
        session.record(&score(1.0, 1.0), 1);
        session.record(&score(0.0, 0.0), 0);
        let current = session.current().expect("segments recorded");
        assert!((current.accuracy - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pace_flag_is_sticky() {
        let mut session = SessionScore::new();
        session.record(
            &CompositeScore {
                pace_out_of_range: true,
                ..score(1.0, 1.0)
            },
            3,
        );
        session.record(&score(1.0, 1.0), 3);
        assert!(session.current().expect("segments recorded").pace_out_of_range);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut session = SessionScore::new();
        session.record(&score(1.0, 1.0), 3);
        session.reset();
        assert!(session.current().is_none());
        assert_eq!(session.segment_count(), 0);
    }
}
