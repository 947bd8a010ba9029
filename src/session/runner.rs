//! Async session driver.
//!
//! Pumps a recognition source's event stream into a session controller
//! from a single task, which is what guarantees serialized, in-order
//! finalization. Also owns the no-speech timer: the sleep is re-armed on
//! every received event, so the window always measures from the last
//! sign of life.

use crate::error::Result;
use crate::recognition::{RecognitionEvent, RecognitionOptions, RecognitionSource};
use crate::session::controller::SessionController;
use crate::session::history::HistoryEntry;
use crate::text::ReferenceText;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Options for driving a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Locale requested from the recognition source.
    pub locale: String,
    /// Options forwarded to the recognition source.
    pub recognition: RecognitionOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            locale: crate::defaults::DEFAULT_LOCALE.to_string(),
            recognition: RecognitionOptions::default(),
        }
    }
}

/// Drives one session from a recognition source.
pub struct SessionRunner {
    options: SessionOptions,
}

impl SessionRunner {
    /// Creates a runner with default options.
    pub fn new() -> Self {
        Self {
            options: SessionOptions::default(),
        }
    }

    /// Creates a runner with custom options.
    pub fn with_options(options: SessionOptions) -> Self {
        Self { options }
    }

    /// Starts the session: validates the reference, starts the source,
    /// and spawns the event loop.
    ///
    /// Fails fast — before any recognition starts — when the reference is
    /// empty, and with the source's error when it cannot start.
    pub async fn start(
        self,
        mut controller: SessionController,
        mut source: Box<dyn RecognitionSource>,
        reference: ReferenceText,
    ) -> Result<SessionHandle> {
        controller.start(reference)?;

        let mut events = source
            .start(&self.options.locale, &self.options.recognition)
            .await?;

        let timeout = controller.no_speech_timeout();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let join = tokio::spawn(async move {
            loop {
                let sleep = tokio::time::sleep(timeout);
                tokio::pin!(sleep);

                tokio::select! {
                    biased;
                    // Stop signal, or the handle was dropped: either way
                    // no further events may be processed.
                    _ = &mut stop_rx => {
                        break;
                    }
                    maybe_event = events.recv() => {
                        match maybe_event {
                            Some(RecognitionEvent::Started) => {}
                            Some(RecognitionEvent::Result(hypothesis)) => {
                                if let Err(e) = controller.on_hypothesis(hypothesis) {
                                    eprintln!("readalign: hypothesis processing failed: {e}");
                                }
                            }
                            Some(RecognitionEvent::Error(code)) => {
                                controller.on_source_error(code);
                                break;
                            }
                            Some(RecognitionEvent::Ended) | None => {
                                controller.stop();
                                break;
                            }
                        }
                    }
                    _ = &mut sleep => {
                        controller.on_no_speech_timeout();
                        break;
                    }
                }
            }
            // Release the recognition resource before handing the
            // controller back; nothing is delivered after this.
            source.stop();
            controller
        });

        Ok(SessionHandle {
            stop_tx: Some(stop_tx),
            join: Some(join),
            controller: None,
        })
    }
}

impl Default for SessionRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running session.
pub struct SessionHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<SessionController>>,
    controller: Option<SessionController>,
}

impl SessionHandle {
    /// Stops the session and returns its recorded history.
    ///
    /// Idempotent: a second call returns the same history. An in-flight
    /// finalization completes before the history is returned.
    pub async fn stop(&mut self) -> Vec<HistoryEntry> {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        self.join_task().await;
        match self.controller.as_mut() {
            Some(controller) => controller.stop(),
            None => Vec::new(),
        }
    }

    /// Waits for the session to end on its own (source end, source error,
    /// or no-speech timeout) without forcing a stop.
    pub async fn wait(&mut self) {
        self.join_task().await;
    }

    /// The controller, once the session has been stopped or waited out.
    /// Exposes final state, cumulative score, and history.
    pub fn controller(&self) -> Option<&SessionController> {
        self.controller.as_ref()
    }

    /// Consumes the handle and returns the controller, once the session
    /// has been stopped or waited out. Lets a caller `reset` and reuse it.
    pub fn into_controller(self) -> Option<SessionController> {
        self.controller
    }

    async fn join_task(&mut self) {
        if let Some(join) = self.join.take() {
            match join.await {
                Ok(controller) => self.controller = Some(controller),
                Err(e) => eprintln!("readalign: session task panicked: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::error::ReadAlignError;
    use crate::events::SessionEvent;
    use crate::recognition::{RecognitionErrorCode, ScriptedRecognitionSource};
    use crate::session::state::{SessionErrorReason, SessionState};
    use std::time::Duration;

    fn reference() -> ReferenceText {
        ReferenceText::new("The cat sat on the mat")
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_session_records_history_and_events() {
        let (tx, rx) = crossbeam_channel::bounded(defaults::EVENT_BUFFER);
        let controller = SessionController::new(1).with_event_sender(tx);
        let source = Box::new(
            ScriptedRecognitionSource::new()
                .then_interim("The cat", 0.5)
                .then_final("The cat sat on the mat", 0.9)
                .then_end(),
        );

        let mut handle = SessionRunner::new()
            .start(controller, source, reference())
            .await
            .expect("session should start");
        handle.wait().await;

        let controller = handle.controller().expect("controller returned after wait");
        assert_eq!(controller.state(), SessionState::Stopped);

        let history = controller.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].score.accuracy, 1.0);

        let events: Vec<SessionEvent> = rx.try_iter().collect();
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::InterimPreview { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::SegmentScored { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_speech_timeout_fails_session() {
        let (tx, rx) = crossbeam_channel::bounded(defaults::EVENT_BUFFER);
        let controller = SessionController::new(1)
            .with_event_sender(tx)
            .with_no_speech_timeout(Duration::from_secs(8));
        // The source stays silent far longer than the timeout window.
        let source = Box::new(
            ScriptedRecognitionSource::new()
                .then_pause(Duration::from_secs(60))
                .then_final("too late", 0.9)
                .then_end(),
        );

        let mut handle = SessionRunner::new()
            .start(controller, source, reference())
            .await
            .expect("session should start");
        handle.wait().await;

        let controller = handle.controller().expect("controller returned after wait");
        assert_eq!(
            controller.state(),
            SessionState::Error(SessionErrorReason::NoSpeechDetected)
        );
        assert!(controller.history().is_empty());

        let events: Vec<SessionEvent> = rx.try_iter().collect();
        assert!(matches!(
            events.last(),
            Some(SessionEvent::SessionError {
                reason: SessionErrorReason::NoSpeechDetected,
                ..
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hypotheses_keep_resetting_the_timer() {
        let controller =
            SessionController::new(1).with_no_speech_timeout(Duration::from_secs(8));
        // Each pause is under the window; together they exceed it.
        let source = Box::new(
            ScriptedRecognitionSource::new()
                .then_pause(Duration::from_secs(5))
                .then_interim("The", 0.4)
                .then_pause(Duration::from_secs(5))
                .then_interim("The cat", 0.5)
                .then_pause(Duration::from_secs(5))
                .then_final("The cat sat on the mat", 0.9)
                .then_end(),
        );

        let mut handle = SessionRunner::new()
            .start(controller, source, reference())
            .await
            .expect("session should start");
        handle.wait().await;

        let controller = handle.controller().expect("controller returned after wait");
        assert_eq!(controller.state(), SessionState::Stopped);
        assert_eq!(controller.history().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_error_surfaces_as_session_error() {
        let controller = SessionController::new(1);
        let source = Box::new(
            ScriptedRecognitionSource::new()
                .then_interim("The cat", 0.5)
                .then_error(RecognitionErrorCode::NotAllowed),
        );

        let mut handle = SessionRunner::new()
            .start(controller, source, reference())
            .await
            .expect("session should start");
        handle.wait().await;

        let controller = handle.controller().expect("controller returned after wait");
        assert_eq!(
            controller.state(),
            SessionState::Error(SessionErrorReason::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn test_source_start_failure_fails_fast() {
        let controller = SessionController::new(1);
        let source = Box::new(ScriptedRecognitionSource::new().with_start_failure());

        let result = SessionRunner::new()
            .start(controller, source, reference())
            .await;
        assert!(matches!(
            result.err(),
            Some(ReadAlignError::RecognitionUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_reference_fails_before_source_starts() {
        let controller = SessionController::new(1);
        let source = Box::new(ScriptedRecognitionSource::new().then_end());

        let result = SessionRunner::new()
            .start(controller, source, ReferenceText::new("   "))
            .await;
        assert!(matches!(
            result.err(),
            Some(ReadAlignError::InvalidReference { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_stop_is_idempotent() {
        let controller = SessionController::new(1);
        let source = Box::new(
            ScriptedRecognitionSource::new()
                .then_final("The cat sat on the mat", 0.9)
                .then_pause(Duration::from_secs(60))
                .then_end(),
        );

        let mut handle = SessionRunner::new()
            .start(controller, source, reference())
            .await
            .expect("session should start");

        // Give the final hypothesis time to arrive before stopping.
        tokio::time::sleep(Duration::from_millis(100)).await;

        let first = handle.stop().await;
        let second = handle.stop().await;
        assert_eq!(first, second);
        assert_eq!(
            handle
                .controller()
                .expect("controller returned after stop")
                .state(),
            SessionState::Stopped
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_events_processed_after_stop() {
        let (tx, rx) = crossbeam_channel::bounded(defaults::EVENT_BUFFER);
        let controller = SessionController::new(1).with_event_sender(tx);
        let source = Box::new(
            ScriptedRecognitionSource::new()
                .then_pause(Duration::from_secs(2))
                .then_final("The cat sat on the mat", 0.9)
                .then_end(),
        );

        let mut handle = SessionRunner::new()
            .start(controller, source, reference())
            .await
            .expect("session should start");

        // Stop before the scripted final ever arrives.
        let history = handle.stop().await;
        assert!(history.is_empty());

        let events: Vec<SessionEvent> = rx.try_iter().collect();
        assert!(
            events
                .iter()
                .all(|e| !matches!(e, SessionEvent::SegmentScored { .. })),
            "no segment may be scored after stop"
        );
    }
}
