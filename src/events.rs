//! Output events emitted by a reading session.
//!
//! Consumers (UI, analytics, gamification) receive these over a bounded
//! crossbeam channel. Emission is non-blocking: a slow consumer loses
//! interim previews, never recorded results — those stay in the history
//! store regardless.

use crate::align::{AlignmentResult, WordMatch};
use crate::analyze::AnalyzerOutcome;
use crate::score::CompositeScore;
use crate::session::state::SessionErrorReason;
use serde::{Deserialize, Serialize};

/// An event published by the session core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Quick preview of an interim hypothesis. Never written to history
    /// and superseded by the segment's final result.
    InterimPreview {
        session_id: u64,
        segment_index: usize,
        matches: Vec<WordMatch>,
    },
    /// A final hypothesis was aligned, scored, and recorded.
    SegmentScored {
        session_id: u64,
        segment_index: usize,
        alignment: AlignmentResult,
        score: CompositeScore,
        cumulative: CompositeScore,
        analysis: Vec<AnalyzerOutcome>,
    },
    /// The session entered a fatal error state.
    SessionError {
        session_id: u64,
        reason: SessionErrorReason,
    },
}

impl SessionEvent {
    /// Serializes the event to JSON for analytics transport.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Non-blocking sender for session events.
pub type EventSender = crossbeam_channel::Sender<SessionEvent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_json_format() {
        let event = SessionEvent::SessionError {
            session_id: 7,
            reason: SessionErrorReason::NoSpeechDetected,
        };
        let json = event.to_json().expect("should serialize");
        assert!(json.contains("\"event\":\"session_error\""), "got: {}", json);
        assert!(json.contains("no_speech_detected"), "got: {}", json);
    }

    #[test]
    fn test_interim_preview_roundtrip() {
        let event = SessionEvent::InterimPreview {
            session_id: 1,
            segment_index: 0,
            matches: Vec::new(),
        };
        let json = event.to_json().expect("should serialize");
        let back: SessionEvent = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, event);
    }
}
