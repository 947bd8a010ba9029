//! Recognition source interface and hypothesis types.

pub mod hypothesis;
pub mod source;

pub use hypothesis::{Alternative, Hypothesis, SpeechSegment};
pub use source::{
    RecognitionErrorCode, RecognitionEvent, RecognitionOptions, RecognitionSource,
    ScriptedRecognitionSource,
};
