//! Reading-session management.
//!
//! The controller is the synchronous state machine and the single writer
//! of session history; the runner drives it from a recognition source's
//! async event stream.

pub mod clock;
pub mod controller;
pub mod history;
pub mod runner;
pub mod state;

pub use clock::{Clock, MockClock, SystemClock};
pub use controller::SessionController;
pub use history::{HistoryEntry, MemoryHistoryStore, SessionHistoryStore};
pub use runner::{SessionHandle, SessionOptions, SessionRunner};
pub use state::{SessionErrorReason, SessionState};
