//! Data types for token alignment results.

use serde::{Deserialize, Serialize};

/// Classification of one reference/hypothesis token pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Exact normalized match.
    Correct,
    /// Fuzzy match above the close threshold (recognizer spelling variant).
    Close,
    /// Same attempted word but clearly misread (between thresholds).
    Similar,
    /// Reference token with no spoken counterpart.
    Missing,
    /// Spoken token with no reference counterpart.
    Extra,
}

impl MatchStatus {
    /// True for statuses that count toward accuracy.
    pub fn is_hit(self) -> bool {
        matches!(self, MatchStatus::Correct | MatchStatus::Close)
    }
}

/// One entry of an alignment: a matched pair or an unmatched token.
///
/// `ref_index` is absent only for Extra entries; `hyp_index` is absent only
/// for Missing entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMatch {
    /// Position in the reference, when a reference token is involved.
    pub ref_index: Option<usize>,
    /// Position in the hypothesis, when a spoken token is involved.
    pub hyp_index: Option<usize>,
    /// Classification of this entry.
    pub status: MatchStatus,
    /// Word similarity for matched pairs; 0.0 for Missing/Extra.
    pub similarity: f32,
    /// What the reader actually said, when anything was said.
    pub spoken_text: Option<String>,
}

/// Ordered alignment of a hypothesis against the reference.
///
/// Covers every reference token exactly once (Correct/Close/Similar/Missing)
/// plus zero or more Extra entries for unmatched hypothesis tokens.
/// Immutable once produced; appended to session history as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    matches: Vec<WordMatch>,
    reference_len: usize,
    hypothesis_len: usize,
}

impl AlignmentResult {
    /// Assembles an alignment from path entries.
    pub(crate) fn new(
        matches: Vec<WordMatch>,
        reference_len: usize,
        hypothesis_len: usize,
    ) -> Self {
        Self {
            matches,
            reference_len,
            hypothesis_len,
        }
    }

    /// The alignment entries in path order.
    pub fn matches(&self) -> &[WordMatch] {
        &self.matches
    }

    /// Number of tokens in the reference this alignment covers.
    pub fn reference_len(&self) -> usize {
        self.reference_len
    }

    /// Number of hypothesis tokens that were aligned.
    pub fn hypothesis_len(&self) -> usize {
        self.hypothesis_len
    }

    /// Number of entries with the given status.
    pub fn count(&self, status: MatchStatus) -> usize {
        self.matches.iter().filter(|m| m.status == status).count()
    }

    /// Number of reference tokens judged correctly spoken (Correct or Close).
    pub fn hit_count(&self) -> usize {
        self.matches.iter().filter(|m| m.status.is_hit()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correct(ref_index: usize, hyp_index: usize, word: &str) -> WordMatch {
        WordMatch {
            ref_index: Some(ref_index),
            hyp_index: Some(hyp_index),
            status: MatchStatus::Correct,
            similarity: 1.0,
            spoken_text: Some(word.to_string()),
        }
    }

    #[test]
    fn test_status_hit_classification() {
        assert!(MatchStatus::Correct.is_hit());
        assert!(MatchStatus::Close.is_hit());
        assert!(!MatchStatus::Similar.is_hit());
        assert!(!MatchStatus::Missing.is_hit());
        assert!(!MatchStatus::Extra.is_hit());
    }

    #[test]
    fn test_counts_by_status() {
        let matches = vec![
            correct(0, 0, "the"),
            WordMatch {
                ref_index: Some(1),
                hyp_index: None,
                status: MatchStatus::Missing,
                similarity: 0.0,
                spoken_text: None,
            },
            WordMatch {
                ref_index: None,
                hyp_index: Some(1),
                status: MatchStatus::Extra,
                similarity: 0.0,
                spoken_text: Some("big".to_string()),
            },
        ];
        let result = AlignmentResult::new(matches, 2, 2);

        assert_eq!(result.count(MatchStatus::Correct), 1);
        assert_eq!(result.count(MatchStatus::Missing), 1);
        assert_eq!(result.count(MatchStatus::Extra), 1);
        assert_eq!(result.hit_count(), 1);
        assert_eq!(result.reference_len(), 2);
        assert_eq!(result.hypothesis_len(), 2);
    }

    #[test]
    fn test_serializes_for_analytics_export() {
        let result = AlignmentResult::new(vec![correct(0, 0, "the")], 1, 1);
        let json = serde_json::to_string(&result).expect("should serialize");
        assert!(json.contains("\"status\":\"correct\""), "got: {}", json);

        let back: AlignmentResult = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, result);
    }
}
