//! Transcript hypotheses emitted by a recognition source.

use crate::text::{tokenize, Token};
use std::time::Instant;

/// One alternative transcript the recognizer also considered.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub text: String,
    pub confidence: f32,
}

impl Alternative {
    /// Creates an alternative, clamping confidence into `[0, 1]`.
    pub fn new(text: &str, confidence: f32) -> Self {
        Self {
            text: text.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// One candidate transcript, interim or final.
///
/// Interim hypotheses may be superseded and are never written to session
/// history; a final hypothesis is terminal for its segment.
#[derive(Debug, Clone)]
pub struct Hypothesis {
    /// The recognizer's best transcript for the segment.
    pub transcript_text: String,
    /// Recognizer confidence in the transcript, `[0, 1]`.
    pub confidence: f32,
    /// Whether the recognizer will revise this transcript further.
    pub is_final: bool,
    /// Lower-ranked candidate transcripts, best first.
    pub alternatives: Vec<Alternative>,
    /// When the recognizer emitted this hypothesis.
    pub emitted_at: Instant,
}

impl Hypothesis {
    /// Creates an interim (revisable) hypothesis.
    pub fn interim(text: &str, confidence: f32) -> Self {
        Self::build(text, confidence, false)
    }

    /// Creates a final hypothesis, terminal for its segment.
    pub fn finalized(text: &str, confidence: f32) -> Self {
        Self::build(text, confidence, true)
    }

    fn build(text: &str, confidence: f32, is_final: bool) -> Self {
        Self {
            transcript_text: text.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
            is_final,
            alternatives: Vec::new(),
            emitted_at: Instant::now(),
        }
    }

    /// Attaches alternative transcripts, best first.
    pub fn with_alternatives(mut self, alternatives: Vec<Alternative>) -> Self {
        self.alternatives = alternatives;
        self
    }

    /// Tokenizes the transcript for alignment.
    pub fn tokens(&self) -> Vec<Token> {
        tokenize(&self.transcript_text)
    }
}

/// The unit of speech submitted to the aligner: one hypothesis plus the
/// wall-clock span it covered.
#[derive(Debug, Clone)]
pub struct SpeechSegment {
    pub session_id: u64,
    pub hypothesis: Hypothesis,
    pub approximate_duration_ms: u32,
}

impl SpeechSegment {
    /// Creates a segment for the given session.
    pub fn new(session_id: u64, hypothesis: Hypothesis, approximate_duration_ms: u32) -> Self {
        Self {
            session_id,
            hypothesis,
            approximate_duration_ms,
        }
    }

    /// Number of spoken tokens in the segment's transcript.
    pub fn token_count(&self) -> usize {
        self.hypothesis.tokens().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interim_hypothesis_is_not_final() {
        let hypothesis = Hypothesis::interim("the cat", 0.7);
        assert!(!hypothesis.is_final);
        assert_eq!(hypothesis.transcript_text, "the cat");
        assert_eq!(hypothesis.confidence, 0.7);
    }

    #[test]
    fn test_finalized_hypothesis_is_final() {
        let hypothesis = Hypothesis::finalized("the cat sat", 0.9);
        assert!(hypothesis.is_final);
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(Hypothesis::interim("x", 1.5).confidence, 1.0);
        assert_eq!(Hypothesis::interim("x", -0.2).confidence, 0.0);
        assert_eq!(Alternative::new("x", 2.0).confidence, 1.0);
    }

    #[test]
    fn test_tokens_are_normalized() {
        let hypothesis = Hypothesis::finalized("The cat, sat!", 0.9);
        let tokens = hypothesis.tokens();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].normalized, "cat");
    }

    #[test]
    fn test_with_alternatives_keeps_order() {
        let hypothesis = Hypothesis::finalized("read", 0.8).with_alternatives(vec![
            Alternative::new("red", 0.6),
            Alternative::new("reed", 0.4),
        ]);
        assert_eq!(hypothesis.alternatives.len(), 2);
        assert_eq!(hypothesis.alternatives[0].text, "red");
    }

    #[test]
    fn test_segment_token_count() {
        let segment = SpeechSegment::new(1, Hypothesis::finalized("the cat sat", 0.9), 1500);
        assert_eq!(segment.token_count(), 3);
        assert_eq!(segment.approximate_duration_ms, 1500);
        assert_eq!(segment.session_id, 1);
    }
}
