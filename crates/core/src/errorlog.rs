//! Bounded in-memory log of recent server-side errors.
//!
//! Feeds the admin log viewer. Best-effort by design: entries live only
//! for the process lifetime, and the oldest entry is dropped when the
//! buffer is full. Recording must never block or fail a request.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default number of entries retained.
pub const DEFAULT_CAPACITY: usize = 500;

/// One recorded error event.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorLogEntry {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub message: String,
}

/// Ring buffer of recent error events.
pub struct ErrorLog {
    capacity: usize,
    entries: Mutex<VecDeque<ErrorLogEntry>>,
}

impl ErrorLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Record an event, evicting the oldest entry when at capacity.
    pub fn record(&self, method: &str, path: &str, status: u16, message: &str) {
        let entry = ErrorLogEntry {
            timestamp: Utc::now(),
            method: method.to_string(),
            path: path.to_string(),
            status,
            message: message.to_string(),
        };

        // A poisoned lock means another recorder panicked mid-push; the
        // buffer contents are still plain data, so keep going.
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Most recent entries, newest first, capped at `limit`.
    pub fn recent(&self, limit: usize) -> Vec<ErrorLogEntry> {
        let entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.iter().rev().take(limit).cloned().collect()
    }

    /// Discard all entries.
    pub fn clear(&self) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.clear();
    }

    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
