use crate::defaults;
use crate::error::Result;
use crate::score::ScoringConfig;
use crate::session::runner::SessionOptions;
use crate::recognition::RecognitionOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub scoring: ScoringConfig,
}

/// Session behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Locale requested from the recognition source.
    pub locale: String,
    /// Milliseconds without a hypothesis before the session fails.
    pub no_speech_timeout_ms: u64,
    /// Whether interim hypotheses are requested for quick previews.
    pub interim_results: bool,
    /// Maximum alternative transcripts requested per hypothesis.
    pub max_alternatives: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            locale: defaults::DEFAULT_LOCALE.to_string(),
            no_speech_timeout_ms: defaults::NO_SPEECH_TIMEOUT_MS,
            interim_results: true,
            max_alternatives: 3,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    // Re-panic on invalid TOML or other errors
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - READALIGN_LOCALE → session.locale
    /// - READALIGN_NO_SPEECH_TIMEOUT_MS → session.no_speech_timeout_ms
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(locale) = std::env::var("READALIGN_LOCALE")
            && !locale.is_empty()
        {
            self.session.locale = locale;
        }
        if let Ok(timeout) = std::env::var("READALIGN_NO_SPEECH_TIMEOUT_MS")
            && let Ok(timeout_ms) = timeout.parse::<u64>()
        {
            self.session.no_speech_timeout_ms = timeout_ms;
        }
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        if self.session.no_speech_timeout_ms == 0 {
            return Err(crate::error::ReadAlignError::ConfigInvalidValue {
                key: "session.no_speech_timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Runner options derived from this configuration.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            locale: self.session.locale.clone(),
            recognition: RecognitionOptions {
                interim_results: self.session.interim_results,
                max_alternatives: self.session.max_alternatives,
            },
        }
    }

    /// The no-speech timeout window as a duration.
    pub fn no_speech_timeout(&self) -> Duration {
        Duration::from_millis(self.session.no_speech_timeout_ms)
    }
}
