//! Shared fuzzy word-similarity primitive.
//!
//! Every component that compares words (aligner, consensus adjustment,
//! pronunciation heuristics) goes through this one function so thresholds
//! mean the same thing everywhere.

/// Normalized edit-distance similarity between two words.
///
/// Returns `1 - levenshtein(a, b) / max(len(a), len(b))`, in `[0, 1]`.
/// Two empty strings compare as identical (1.0). Symmetric by construction.
pub fn similarity(a: &str, b: &str) -> f32 {
    strsim::normalized_levenshtein(a, b) as f32
}
