//! Token-sequence alignment between reference and hypothesis.
//!
//! A dynamic-programming edit distance over whole tokens, not characters:
//! the path decides which spoken word corresponds to which reference word,
//! tolerating omissions, insertions, and substitutions. Pairing words by
//! index alone would misclassify every word after a single skip.

use crate::align::types::{AlignmentResult, MatchStatus, WordMatch};
use crate::defaults;
use crate::text::{similarity, ReferenceText, Token};

/// Cost comparisons tolerate float rounding from summed similarities.
const COST_EPSILON: f32 = 1e-6;

/// Path operation chosen for a DP cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Start,
    /// Reference and hypothesis token paired.
    Diag,
    /// Reference token skipped by the reader (deletion).
    Del,
    /// Hypothesis token with no reference counterpart (insertion).
    Ins,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    cost: f32,
    /// Total insertions+deletions on the best path to this cell.
    /// Used to break cost ties in favor of positional order.
    indels: u32,
    op: Op,
}

/// Aligns hypothesis token sequences against a reference passage.
#[derive(Debug, Clone, Copy)]
pub struct Aligner {
    /// Similarity at or above which a pairing costs nothing.
    close_threshold: f32,
    /// Similarity below which a pairing is not plausible at all.
    similar_threshold: f32,
}

impl Default for Aligner {
    fn default() -> Self {
        Self {
            close_threshold: defaults::CLOSE_THRESHOLD,
            similar_threshold: defaults::SIMILAR_THRESHOLD,
        }
    }
}

impl Aligner {
    /// Creates an aligner with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aligner with custom classification thresholds.
    pub fn with_thresholds(close_threshold: f32, similar_threshold: f32) -> Self {
        Self {
            close_threshold,
            similar_threshold,
        }
    }

    /// Computes the minimum-cost alignment of `hypothesis` against `reference`.
    ///
    /// Every reference token appears exactly once in the result (Correct,
    /// Close, Similar, or Missing); unmatched hypothesis tokens appear as
    /// Extra entries. An empty hypothesis marks the whole reference Missing.
    pub fn align(&self, reference: &ReferenceText, hypothesis: &[Token]) -> AlignmentResult {
        let ref_tokens = reference.tokens();
        let n = ref_tokens.len();
        let m = hypothesis.len();

        // dp[i][j]: best alignment of the first i reference tokens with the
        // first j hypothesis tokens.
        let mut dp = vec![
            vec![
                Cell {
                    cost: 0.0,
                    indels: 0,
                    op: Op::Start,
                };
                m + 1
            ];
            n + 1
        ];

        for i in 1..=n {
            dp[i][0] = Cell {
                cost: i as f32,
                indels: i as u32,
                op: Op::Del,
            };
        }
        for j in 1..=m {
            dp[0][j] = Cell {
                cost: j as f32,
                indels: j as u32,
                op: Op::Ins,
            };
        }

        for i in 1..=n {
            for j in 1..=m {
                let sim = similarity(&ref_tokens[i - 1].normalized, &hypothesis[j - 1].normalized);

                // Evaluate the diagonal first so cost ties resolve toward
                // pairing, keeping insertions+deletions minimal.
                let mut best: Option<Cell> = None;
                if sim >= self.similar_threshold {
                    let pair_cost = if sim >= self.close_threshold {
                        0.0
                    } else {
                        1.0 - sim
                    };
                    best = Some(Cell {
                        cost: dp[i - 1][j - 1].cost + pair_cost,
                        indels: dp[i - 1][j - 1].indels,
                        op: Op::Diag,
                    });
                }

                let del = Cell {
                    cost: dp[i - 1][j].cost + 1.0,
                    indels: dp[i - 1][j].indels + 1,
                    op: Op::Del,
                };
                let ins = Cell {
                    cost: dp[i][j - 1].cost + 1.0,
                    indels: dp[i][j - 1].indels + 1,
                    op: Op::Ins,
                };

                for candidate in [del, ins] {
                    best = Some(match best {
                        None => candidate,
                        Some(current) if beats(candidate, current) => candidate,
                        Some(current) => current,
                    });
                }

                // At least Del/Ins are always available, so best is set.
                if let Some(cell) = best {
                    dp[i][j] = cell;
                }
            }
        }

        // Walk the path back from the corner, then reverse into reading order.
        let mut matches = Vec::with_capacity(n + m);
        let (mut i, mut j) = (n, m);
        while i > 0 || j > 0 {
            match dp[i][j].op {
                Op::Diag => {
                    let reference = &ref_tokens[i - 1];
                    let spoken = &hypothesis[j - 1];
                    let sim = similarity(&reference.normalized, &spoken.normalized);
                    let status = if reference.normalized == spoken.normalized {
                        MatchStatus::Correct
                    } else if sim >= self.close_threshold {
                        MatchStatus::Close
                    } else {
                        MatchStatus::Similar
                    };
                    matches.push(WordMatch {
                        ref_index: Some(i - 1),
                        hyp_index: Some(j - 1),
                        status,
                        similarity: sim,
                        spoken_text: Some(spoken.raw.clone()),
                    });
                    i -= 1;
                    j -= 1;
                }
                Op::Del => {
                    matches.push(WordMatch {
                        ref_index: Some(i - 1),
                        hyp_index: None,
                        status: MatchStatus::Missing,
                        similarity: 0.0,
                        spoken_text: None,
                    });
                    i -= 1;
                }
                Op::Ins => {
                    matches.push(WordMatch {
                        ref_index: None,
                        hyp_index: Some(j - 1),
                        status: MatchStatus::Extra,
                        similarity: 0.0,
                        spoken_text: Some(hypothesis[j - 1].raw.clone()),
                    });
                    j -= 1;
                }
                Op::Start => break,
            }
        }
        matches.reverse();

        AlignmentResult::new(matches, n, m)
    }
}

/// True when `candidate` is strictly better than `current`: lower cost, or
/// equal cost with fewer insertions+deletions.
fn beats(candidate: Cell, current: Cell) -> bool {
    if candidate.cost < current.cost - COST_EPSILON {
        return true;
    }
    (candidate.cost - current.cost).abs() <= COST_EPSILON && candidate.indels < current.indels
}
