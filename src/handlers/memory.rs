//! In-memory handler

use crate::core::{Handler, LogEntry, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps every record it receives. Clones share the same buffer, so one
/// clone can be given to a `Logger` while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct MemoryHandler {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records received so far, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn last(&self) -> Option<LogEntry> {
        self.entries.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn handle_log(&self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }
}
