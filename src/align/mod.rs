//! Reference/hypothesis token alignment.

pub mod aligner;
pub mod types;

pub use aligner::Aligner;
pub use types::{AlignmentResult, MatchStatus, WordMatch};
