//! Session state machine.
//!
//! The controller is the single writer of session history. It is fully
//! synchronous and deterministic; the async runner drives it from the
//! recognition event stream. Hypotheses arriving while a finalization is
//! in flight are buffered and drained strictly in arrival order, so
//! recorded history never races.

use crate::align::Aligner;
use crate::analyze::AnalyzerPipeline;
use crate::defaults;
use crate::error::{ReadAlignError, Result};
use crate::events::{EventSender, SessionEvent};
use crate::recognition::{Hypothesis, RecognitionErrorCode, SpeechSegment};
use crate::score::{CompositeScore, Scorer, SessionScore};
use crate::session::clock::{Clock, SystemClock};
use crate::session::history::{HistoryEntry, MemoryHistoryStore, SessionHistoryStore};
use crate::session::state::{reason_from_code, SessionErrorReason, SessionState};
use crate::text::ReferenceText;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// State machine for one reading session.
pub struct SessionController {
    session_id: u64,
    state: SessionState,
    reference: Option<ReferenceText>,
    aligner: Aligner,
    scorer: Scorer,
    analyzers: AnalyzerPipeline,
    history: Box<dyn SessionHistoryStore>,
    session_score: SessionScore,
    /// Hypotheses buffered while a finalization is in flight.
    pending: VecDeque<Hypothesis>,
    /// Guards against reentrant draining; finalizations stay serialized.
    draining: bool,
    segments_finalized: usize,
    /// Start of the current segment window, for duration estimation.
    segment_anchor: Option<std::time::Instant>,
    last_activity: Option<std::time::Instant>,
    no_speech_timeout: Duration,
    clock: Arc<dyn Clock>,
    event_tx: Option<EventSender>,
}

impl SessionController {
    /// Creates a controller with default aligner, scorer, analyzers, and
    /// an in-memory history store.
    pub fn new(session_id: u64) -> Self {
        let scorer = Scorer::default();
        let analyzers = AnalyzerPipeline::standard(scorer.config().clone());
        Self {
            session_id,
            state: SessionState::Idle,
            reference: None,
            aligner: Aligner::new(),
            scorer,
            analyzers,
            history: Box::new(MemoryHistoryStore::new()),
            session_score: SessionScore::new(),
            pending: VecDeque::new(),
            draining: false,
            segments_finalized: 0,
            segment_anchor: None,
            last_activity: None,
            no_speech_timeout: Duration::from_millis(defaults::NO_SPEECH_TIMEOUT_MS),
            clock: Arc::new(SystemClock),
            event_tx: None,
        }
    }

    /// Sets a custom aligner.
    pub fn with_aligner(mut self, aligner: Aligner) -> Self {
        self.aligner = aligner;
        self
    }

    /// Sets a custom scorer.
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Sets the analyzer pipeline run on each finalized segment.
    pub fn with_analyzers(mut self, analyzers: AnalyzerPipeline) -> Self {
        self.analyzers = analyzers;
        self
    }

    /// Sets the history store backend.
    pub fn with_history_store(mut self, history: Box<dyn SessionHistoryStore>) -> Self {
        self.history = history;
        self
    }

    /// Sets a custom clock (for deterministic testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the sender for output events.
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Sets the no-speech timeout window.
    pub fn with_no_speech_timeout(mut self, timeout: Duration) -> Self {
        self.no_speech_timeout = timeout;
        self
    }

    /// The session identifier.
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The configured no-speech timeout window.
    pub fn no_speech_timeout(&self) -> Duration {
        self.no_speech_timeout
    }

    /// Starts the session with the passage to be read.
    ///
    /// Fails with `InvalidReference` when the passage contains no words,
    /// before any recognition is started.
    pub fn start(&mut self, reference: ReferenceText) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(ReadAlignError::InvalidState {
                state: self.state.to_string(),
            });
        }
        if reference.is_empty() {
            return Err(ReadAlignError::InvalidReference {
                message: "reference text contains no words".to_string(),
            });
        }
        let now = self.clock.now();
        self.reference = Some(reference);
        self.segment_anchor = Some(now);
        self.last_activity = Some(now);
        self.state = SessionState::Listening;
        Ok(())
    }

    /// Feeds one recognition hypothesis into the session.
    ///
    /// Interim hypotheses take the quick-preview path: an event is emitted
    /// and nothing is recorded. Final hypotheses are finalized in arrival
    /// order. Hypotheses arriving outside an active session are dropped.
    pub fn on_hypothesis(&mut self, hypothesis: Hypothesis) -> Result<()> {
        match self.state {
            SessionState::Listening => {
                self.last_activity = Some(self.clock.now());
                self.pending.push_back(hypothesis);
                self.drain_pending()
            }
            SessionState::Finalizing => {
                // A finalization is in flight: buffer, never drop.
                self.last_activity = Some(self.clock.now());
                self.pending.push_back(hypothesis);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Translates a recognition source error into session state.
    ///
    /// A deliberate abort counts as a normal stop, not a fault.
    pub fn on_source_error(&mut self, code: RecognitionErrorCode) {
        match reason_from_code(code) {
            Some(reason) => self.fail(reason),
            None => {
                self.stop();
            }
        }
    }

    /// Fails the session with a no-speech error if it is still listening.
    pub fn on_no_speech_timeout(&mut self) {
        if self.state == SessionState::Listening {
            self.fail(SessionErrorReason::NoSpeechDetected);
        }
    }

    /// Checks the no-speech timer against the clock, failing the session
    /// when the window has elapsed. Returns true when it fired.
    pub fn check_timeout(&mut self) -> bool {
        if self.state != SessionState::Listening {
            return false;
        }
        let Some(last) = self.last_activity else {
            return false;
        };
        if self.clock.now().duration_since(last) >= self.no_speech_timeout {
            self.on_no_speech_timeout();
            true
        } else {
            false
        }
    }

    /// Stops the session and returns its recorded history.
    ///
    /// Idempotent and safe in any state: buffered interim hypotheses are
    /// discarded, buffered final hypotheses finish recording, and no
    /// hypothesis is processed afterwards.
    pub fn stop(&mut self) -> Vec<HistoryEntry> {
        if self.state != SessionState::Stopped {
            self.pending.retain(|h| h.is_final);
            let _ = self.drain_pending();
            self.pending.clear();
            self.state = SessionState::Stopped;
        }
        self.history.by_session(self.session_id)
    }

    /// Returns the session to `Idle`, clearing reference and history.
    pub fn reset(&mut self) {
        self.history.clear(self.session_id);
        self.reference = None;
        self.session_score.reset();
        self.pending.clear();
        self.draining = false;
        self.segments_finalized = 0;
        self.segment_anchor = None;
        self.last_activity = None;
        self.state = SessionState::Idle;
    }

    /// The cumulative session score so far.
    ///
    /// Remains queryable in every state, including `Stopped` and `Error`,
    /// so a caller can always show partial progress.
    pub fn cumulative_score(&self) -> Option<CompositeScore> {
        self.session_score.current()
    }

    /// The recorded history so far, in arrival order.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.by_session(self.session_id)
    }

    /// Drains buffered hypotheses in arrival order. The `draining` guard
    /// keeps a reentrant call from interleaving finalizations.
    fn drain_pending(&mut self) -> Result<()> {
        if self.draining {
            return Ok(());
        }
        self.draining = true;
        let result = self.drain_loop();
        self.draining = false;
        result
    }

    fn drain_loop(&mut self) -> Result<()> {
        while let Some(hypothesis) = self.pending.pop_front() {
            if !self.state.is_active() {
                break;
            }
            if hypothesis.is_final {
                self.state = SessionState::Finalizing;
                let result = self.process_segment(hypothesis);
                if self.state == SessionState::Finalizing {
                    self.state = SessionState::Listening;
                }
                result?;
            } else {
                self.preview(&hypothesis);
            }
        }
        Ok(())
    }

    /// Finalizes one segment: align, score, record, analyze, emit.
    fn process_segment(&mut self, hypothesis: Hypothesis) -> Result<()> {
        let Some(reference) = self.reference.as_ref() else {
            return Err(ReadAlignError::InvalidState {
                state: self.state.to_string(),
            });
        };

        let now = self.clock.now();
        let duration_ms = self
            .segment_anchor
            .map(|anchor| now.duration_since(anchor).as_millis().min(u32::MAX as u128) as u32)
            .unwrap_or(0);

        let alignment = self.aligner.align(reference, &hypothesis.tokens());
        let segment = SpeechSegment::new(self.session_id, hypothesis, duration_ms);
        let score = self.scorer.score(&alignment, &segment);

        self.session_score.record(&score, segment.token_count());
        self.history.append(
            self.session_id,
            HistoryEntry {
                alignment: alignment.clone(),
                score,
            },
        );

        let analysis = self.analyzers.run(&segment, &alignment, &score);

        let segment_index = self.segments_finalized;
        self.segments_finalized += 1;
        self.segment_anchor = Some(now);

        let cumulative = self.session_score.current().unwrap_or(score);
        self.emit(SessionEvent::SegmentScored {
            session_id: self.session_id,
            segment_index,
            alignment,
            score,
            cumulative,
            analysis,
        });
        Ok(())
    }

    /// Quick-preview path for interim hypotheses: fire-and-forget, never
    /// recorded, superseded by the segment's final result.
    fn preview(&mut self, hypothesis: &Hypothesis) {
        let Some(reference) = self.reference.as_ref() else {
            return;
        };
        // No consumer means no work: previews are purely advisory.
        let Some(event_tx) = &self.event_tx else {
            return;
        };
        let alignment = self.aligner.align(reference, &hypothesis.tokens());
        let event = SessionEvent::InterimPreview {
            session_id: self.session_id,
            segment_index: self.segments_finalized,
            matches: alignment.matches().to_vec(),
        };
        let _ = event_tx.try_send(event);
    }

    fn fail(&mut self, reason: SessionErrorReason) {
        if !self.state.is_active() {
            return;
        }
        self.pending.clear();
        self.state = SessionState::Error(reason);
        self.emit(SessionEvent::SessionError {
            session_id: self.session_id,
            reason,
        });
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.event_tx {
            // Non-blocking by contract: a full channel drops the event
            // rather than stalling hypothesis processing.
            let _ = tx.try_send(event);
        }
    }
}
