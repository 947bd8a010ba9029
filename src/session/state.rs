//! Session lifecycle states.

use crate::recognition::RecognitionErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a session entered the error state.
///
/// All reasons are session-fatal: the only way forward is `reset` followed
/// by a fresh `start`. Retry policy belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionErrorReason {
    /// No hypothesis arrived within the configured timeout window.
    NoSpeechDetected,
    /// The recognition service could not be started or failed mid-session.
    RecognitionUnavailable,
    /// The user denied microphone permission.
    PermissionDenied,
    /// The recognition service lost its network connection.
    NetworkError,
}

impl fmt::Display for SessionErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SessionErrorReason::NoSpeechDetected => "no speech detected",
            SessionErrorReason::RecognitionUnavailable => "recognition unavailable",
            SessionErrorReason::PermissionDenied => "permission denied",
            SessionErrorReason::NetworkError => "network error",
        };
        write!(f, "{}", text)
    }
}

/// Lifecycle state of a reading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No reference loaded; ready for `start`.
    Idle,
    /// Recognition is live; hypotheses are being processed.
    Listening,
    /// A final hypothesis is being turned into a recorded result.
    Finalizing,
    /// The session was stopped; history remains queryable.
    Stopped,
    /// A fatal error occurred; recoverable only via `reset`.
    Error(SessionErrorReason),
}

impl SessionState {
    /// True while the session accepts hypotheses.
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::Listening | SessionState::Finalizing)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Listening => write!(f, "listening"),
            SessionState::Finalizing => write!(f, "finalizing"),
            SessionState::Stopped => write!(f, "stopped"),
            SessionState::Error(reason) => write!(f, "error ({})", reason),
        }
    }
}

/// Maps a recognition source error code to a session error reason.
///
/// `Aborted` maps to `None`: a deliberate abort is a normal end, not a
/// fault to surface.
pub fn reason_from_code(code: RecognitionErrorCode) -> Option<SessionErrorReason> {
    match code {
        RecognitionErrorCode::NoSpeech => Some(SessionErrorReason::NoSpeechDetected),
        RecognitionErrorCode::AudioCapture => Some(SessionErrorReason::RecognitionUnavailable),
        RecognitionErrorCode::NotAllowed => Some(SessionErrorReason::PermissionDenied),
        RecognitionErrorCode::Network => Some(SessionErrorReason::NetworkError),
        RecognitionErrorCode::Aborted => None,
    }
}
