//! Fan-out handler

use crate::core::{Handler, LogEntry, Result};
use std::sync::Arc;

/// Passes each record to several handlers in order.
///
/// Delivery stops at the first handler that fails and that failure is
/// returned; later handlers do not see the record.
#[derive(Clone, Default)]
pub struct MultiHandler {
    handlers: Vec<Arc<dyn Handler>>,
}

impl MultiHandler {
    pub fn new(handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self { handlers }
    }

    #[must_use]
    pub fn with_handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Handler for MultiHandler {
    fn handle_log(&self, entry: &LogEntry) -> Result<()> {
        for handler in &self.handlers {
            handler.handle_log(entry)?;
        }
        Ok(())
    }
}
