//! Text tokenization, normalization, and word similarity.

pub mod similarity;
pub mod token;

pub use similarity::similarity;
pub use token::{normalize_word, tokenize, ReferenceText, Token};
