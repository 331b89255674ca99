//! Handler trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// Consumes finalized records, writing them to stdio, files or remote
/// services.
///
/// A logger calls `handle_log` from whichever thread emitted the record and
/// performs no locking of its own, so implementations must serialize access
/// to any shared writer themselves.
pub trait Handler: Send + Sync {
    fn handle_log(&self, entry: &LogEntry) -> Result<()>;
}

/// Adapter allowing an ordinary closure to be used as a `Handler`.
///
/// # Example
///
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let handler = HandlerFn::new(|entry: &LogEntry| {
///     eprintln!("{} {}", entry.level, entry.message);
///     Ok(())
/// });
/// let logger = Logger::new(handler);
/// logger.info("ready");
/// ```
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F>
where
    F: Fn(&LogEntry) -> Result<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&LogEntry) -> Result<()> + Send + Sync,
{
    fn handle_log(&self, entry: &LogEntry) -> Result<()> {
        (self.f)(entry)
    }
}
