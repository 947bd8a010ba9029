//! readalign - Speech-transcript alignment and scoring for reading practice
//!
//! Turns a noisy, partial stream of recognition hypotheses into per-word
//! correctness judgments and session-level accuracy/fluency/confidence
//! scores while a learner reads a known passage aloud.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod align;
pub mod analyze;
pub mod config;
pub mod defaults;
pub mod error;
pub mod events;
pub mod recognition;
pub mod score;
pub mod session;
pub mod text;

// Core traits (source → session → consumers)
pub use analyze::{Analyzer, FailureReporter};
pub use recognition::RecognitionSource;
pub use session::{Clock, SessionHistoryStore};

// Session driving
pub use session::{SessionController, SessionHandle, SessionOptions, SessionRunner};

// Pipeline building blocks
pub use align::{Aligner, AlignmentResult, MatchStatus, WordMatch};
pub use analyze::AnalyzerPipeline;
pub use score::{CompositeScore, Scorer, ScoringConfig, SessionScore};
pub use text::{similarity, ReferenceText, Token};

// Events & state
pub use events::SessionEvent;
pub use session::{HistoryEntry, SessionErrorReason, SessionState};

// Error handling
pub use error::{ReadAlignError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
