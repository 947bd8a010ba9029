//! Session history storage.
//!
//! The core appends recorded segments through this narrow interface;
//! where they persist (memory, disk, a sync service) is the embedder's
//! concern. Nothing else in the crate touches storage.

use crate::align::AlignmentResult;
use crate::score::CompositeScore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One recorded segment: the alignment and the score derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub alignment: AlignmentResult,
    pub score: CompositeScore,
}

/// Append/query interface for recorded session segments.
pub trait SessionHistoryStore: Send {
    /// Appends a recorded segment to a session's history.
    fn append(&mut self, session_id: u64, entry: HistoryEntry);

    /// Returns a session's recorded segments in arrival order.
    fn by_session(&self, session_id: u64) -> Vec<HistoryEntry>;

    /// Number of segments recorded for a session.
    fn segment_count(&self, session_id: u64) -> usize;

    /// Removes all segments recorded for a session.
    fn clear(&mut self, session_id: u64);
}

/// In-memory history store; the default backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    entries: HashMap<u64, Vec<HistoryEntry>>,
}

impl MemoryHistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionHistoryStore for MemoryHistoryStore {
    fn append(&mut self, session_id: u64, entry: HistoryEntry) {
        self.entries.entry(session_id).or_default().push(entry);
    }

    fn by_session(&self, session_id: u64) -> Vec<HistoryEntry> {
        self.entries.get(&session_id).cloned().unwrap_or_default()
    }

    fn segment_count(&self, session_id: u64) -> usize {
        self.entries.get(&session_id).map_or(0, Vec::len)
    }

    fn clear(&mut self, session_id: u64) {
        self.entries.remove(&session_id);
    }
}
