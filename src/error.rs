//! Error types for readalign.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadAlignError {
    // Session setup errors
    #[error("Invalid reference text: {message}")]
    InvalidReference { message: String },

    #[error("Session is not in a startable state: {state}")]
    InvalidState { state: String },

    // Recognition source errors (session-fatal)
    #[error("Recognition service unavailable: {message}")]
    RecognitionUnavailable { message: String },

    #[error("Microphone permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Network error during recognition: {message}")]
    NetworkError { message: String },

    #[error("No speech detected within {timeout_ms}ms")]
    NoSpeechDetected { timeout_ms: u64 },

    // Analyzer errors (non-fatal, isolated per analyzer)
    #[error("Analyzer '{name}' failed: {message}")]
    AnalyzerFailure { name: String, message: String },

    // History store errors
    #[error("History store error: {message}")]
    HistoryStore { message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Serialization errors (history export)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ReadAlignError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_reference_display() {
        let error = ReadAlignError::InvalidReference {
            message: "reference text contains no words".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid reference text: reference text contains no words"
        );
    }

    #[test]
    fn test_recognition_unavailable_display() {
        let error = ReadAlignError::RecognitionUnavailable {
            message: "service not started".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Recognition service unavailable: service not started"
        );
    }

    #[test]
    fn test_permission_denied_display() {
        let error = ReadAlignError::PermissionDenied {
            message: "microphone access blocked".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Microphone permission denied: microphone access blocked"
        );
    }

    #[test]
    fn test_no_speech_detected_display() {
        let error = ReadAlignError::NoSpeechDetected { timeout_ms: 8000 };
        assert_eq!(error.to_string(), "No speech detected within 8000ms");
    }

    #[test]
    fn test_analyzer_failure_display() {
        let error = ReadAlignError::AnalyzerFailure {
            name: "pace".to_string(),
            message: "division by zero duration".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Analyzer 'pace' failed: division by zero duration"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = ReadAlignError::ConfigInvalidValue {
            key: "scoring.accuracy_weight".to_string(),
            message: "must be non-negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for scoring.accuracy_weight: must be non-negative"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: ReadAlignError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: ReadAlignError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: ReadAlignError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ReadAlignError>();
        assert_sync::<ReadAlignError>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);

        fn returns_error() -> Result<i32> {
            Err(ReadAlignError::Other("test error".to_string()))
        }
        assert!(returns_error().is_err());
    }
}
