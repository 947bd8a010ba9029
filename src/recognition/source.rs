//! Recognition source abstraction.
//!
//! The platform speech service is consumed, never implemented, by this
//! crate: a source is started with a locale and streams hypothesis events
//! until it ends or errors. The scripted implementation below stands in for
//! the real service in tests and offline development.

use crate::error::{ReadAlignError, Result};
use crate::recognition::hypothesis::Hypothesis;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;

/// Error codes a recognition source can terminate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionErrorCode {
    /// The service heard nothing it could transcribe.
    NoSpeech,
    /// Audio capture failed on the service side.
    AudioCapture,
    /// The user denied microphone permission.
    NotAllowed,
    /// The service lost its network connection.
    Network,
    /// The service was deliberately aborted; not an error condition.
    Aborted,
}

/// Events streamed by a recognition source.
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// The service is live and listening.
    Started,
    /// A new interim or final hypothesis.
    Result(Hypothesis),
    /// The service finished normally.
    Ended,
    /// The service terminated abnormally.
    Error(RecognitionErrorCode),
}

/// Options passed to a recognition source on start.
#[derive(Debug, Clone)]
pub struct RecognitionOptions {
    /// Whether the service should emit interim (revisable) hypotheses.
    pub interim_results: bool,
    /// Maximum number of alternative transcripts per hypothesis.
    pub max_alternatives: usize,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            interim_results: true,
            max_alternatives: 3,
        }
    }
}

/// A speech recognition service consumed by the session runner.
///
/// This trait allows swapping implementations (platform service vs scripted).
#[async_trait]
pub trait RecognitionSource: Send {
    /// Starts recognition for the given locale.
    ///
    /// # Returns
    /// A receiver of recognition events. The stream terminates with
    /// `Ended` or `Error`; nothing is sent after either.
    async fn start(
        &mut self,
        locale: &str,
        options: &RecognitionOptions,
    ) -> Result<mpsc::Receiver<RecognitionEvent>>;

    /// Releases recognition resources synchronously.
    ///
    /// Must be safe to call in any state, including before `start` and
    /// more than once. No events are delivered after `stop` returns.
    fn stop(&mut self);
}

/// One step of a scripted recognition run.
#[derive(Debug, Clone)]
enum ScriptStep {
    Emit(RecognitionEvent),
    Pause(Duration),
}

/// Scripted recognition source for tests and offline development.
///
/// Plays back a fixed sequence of events with a configurable delay between
/// steps, mimicking how a platform service trickles hypotheses in.
#[derive(Debug, Clone)]
pub struct ScriptedRecognitionSource {
    steps: Vec<ScriptStep>,
    step_delay: Duration,
    fail_start: bool,
    started: bool,
}

impl ScriptedRecognitionSource {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            step_delay: Duration::from_millis(1),
            fail_start: false,
            started: false,
        }
    }

    /// Sets the delay inserted before each scripted step.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Configures `start` to fail with a service-unavailable error.
    pub fn with_start_failure(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Appends an interim hypothesis to the script.
    pub fn then_interim(mut self, text: &str, confidence: f32) -> Self {
        self.steps.push(ScriptStep::Emit(RecognitionEvent::Result(
            Hypothesis::interim(text, confidence),
        )));
        self
    }

    /// Appends a final hypothesis to the script.
    pub fn then_final(mut self, text: &str, confidence: f32) -> Self {
        self.steps.push(ScriptStep::Emit(RecognitionEvent::Result(
            Hypothesis::finalized(text, confidence),
        )));
        self
    }

    /// Appends a prebuilt hypothesis to the script.
    pub fn then_hypothesis(mut self, hypothesis: Hypothesis) -> Self {
        self.steps
            .push(ScriptStep::Emit(RecognitionEvent::Result(hypothesis)));
        self
    }

    /// Appends an error termination to the script.
    pub fn then_error(mut self, code: RecognitionErrorCode) -> Self {
        self.steps
            .push(ScriptStep::Emit(RecognitionEvent::Error(code)));
        self
    }

    /// Appends a normal end to the script.
    pub fn then_end(mut self) -> Self {
        self.steps.push(ScriptStep::Emit(RecognitionEvent::Ended));
        self
    }

    /// Appends a silent pause to the script.
    pub fn then_pause(mut self, duration: Duration) -> Self {
        self.steps.push(ScriptStep::Pause(duration));
        self
    }

    /// True between `start` and `stop`.
    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl Default for ScriptedRecognitionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecognitionSource for ScriptedRecognitionSource {
    async fn start(
        &mut self,
        _locale: &str,
        _options: &RecognitionOptions,
    ) -> Result<mpsc::Receiver<RecognitionEvent>> {
        if self.fail_start {
            return Err(ReadAlignError::RecognitionUnavailable {
                message: "scripted start failure".to_string(),
            });
        }

        let (tx, rx) = mpsc::channel(crate::defaults::EVENT_BUFFER);
        let steps = self.steps.clone();
        let step_delay = self.step_delay;
        self.started = true;

        tokio::spawn(async move {
            if tx.send(RecognitionEvent::Started).await.is_err() {
                return;
            }
            for step in steps {
                match step {
                    ScriptStep::Emit(event) => {
                        tokio::time::sleep(step_delay).await;
                        if tx.send(event).await.is_err() {
                            // Receiver dropped: the session stopped.
                            return;
                        }
                    }
                    ScriptStep::Pause(duration) => {
                        tokio::time::sleep(duration).await;
                    }
                }
            }
        });

        Ok(rx)
    }

    fn stop(&mut self) {
        // Dropping the receiver side is what actually tears the stream
        // down; the playback task exits on its next failed send.
        self.started = false;
    }
}
