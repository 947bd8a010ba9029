//! Default configuration constants for readalign.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Similarity at or above which a matched token pair counts as spoken
/// correctly (Correct when exact, Close when fuzzy).
///
/// 0.8 tolerates a single edit in a five-letter word, which absorbs most
/// recognizer spelling variants without accepting genuinely different words.
pub const CLOSE_THRESHOLD: f32 = 0.8;

/// Similarity at or above which a token pair is still considered the same
/// attempted word (Similar), below which the pair is treated as an omission
/// plus an insertion.
pub const SIMILAR_THRESHOLD: f32 = 0.5;

/// Default locale requested from the recognition source.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Milliseconds without any hypothesis before the session fails with a
/// no-speech error.
///
/// 8 seconds covers a hesitant reader taking a breath before starting
/// while still failing fast when the microphone hears nothing.
pub const NO_SPEECH_TIMEOUT_MS: u64 = 8000;

/// Lower bound of the words-per-minute band considered an optimal
/// oral-reading pace.
pub const OPTIMAL_WPM_MIN: f32 = 120.0;

/// Upper bound of the optimal words-per-minute band.
pub const OPTIMAL_WPM_MAX: f32 = 180.0;

/// Ceiling for plausible words-per-minute values.
///
/// Faster-than-400 readings come from duration underestimates or recognizer
/// stutter, so values beyond this are clamped and flagged.
pub const WPM_CLAMP_MAX: f32 = 400.0;

/// Weight of alignment accuracy in the overall composite score.
pub const ACCURACY_WEIGHT: f32 = 0.5;

/// Weight of recognizer confidence in the overall composite score.
pub const CONFIDENCE_WEIGHT: f32 = 0.3;

/// Weight of fluency fit in the overall composite score.
pub const FLUENCY_WEIGHT: f32 = 0.2;

/// Mean alternative-to-primary similarity below which the recognizer's
/// alternatives are considered to disagree with its primary transcript.
pub const CONSENSUS_FLOOR: f32 = 0.5;

/// Factor applied to confidence when alternatives disagree strongly.
pub const CONSENSUS_PENALTY: f32 = 0.8;

/// Minimum recurring substitution pairs before the pronunciation-pattern
/// analyzer reports a score instead of "unknown".
pub const PATTERN_MIN_EVIDENCE: usize = 3;

/// Buffer size for session event channels.
pub const EVENT_BUFFER: usize = 64;
