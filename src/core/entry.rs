//! Chained construction of log records
//!
//! An `Entry` collects field layers and a hierarchical name until one of its
//! leveled methods hands it to the owning `Logger`. Every builder returns a
//! new `Entry` and leaves the receiver untouched, so a partially built entry
//! can be shared and extended from several places.

use super::fields::{ErrorValue, FieldValue, Fielder, Fields};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::logger::Logger;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Field key set by [`Entry::with_error`].
pub const ERROR_KEY: &str = "error";

/// Field key set by [`Entry::with_duration`].
pub const DURATION_KEY: &str = "duration";

/// A log record under construction.
///
/// # Example
///
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let memory = MemoryHandler::new();
/// let logger = Logger::new(memory.clone());
///
/// let request = logger.named("http").with_field("method", "GET");
/// request.with_field("status", 200).info("request served");
///
/// let entries = memory.entries();
/// assert_eq!(entries[0].name.as_deref(), Some("http"));
/// assert_eq!(entries[0].fields.len(), 2);
/// ```
#[derive(Clone)]
pub struct Entry {
    logger: Logger,
    name: Option<String>,
    stack: Vec<Arc<Fields>>,
    message: String,
    start: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn new(logger: &Logger) -> Self {
        Self {
            logger: logger.clone(),
            name: None,
            stack: Vec::new(),
            message: String::new(),
            start: None,
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Hierarchical name, segments joined by `/`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Message recorded by [`Entry::trace`], kept by entries derived from a
    /// traced one; empty otherwise.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Number of unmerged field layers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The field stack flattened into one map, later layers winning.
    pub fn fields(&self) -> Fields {
        let mut merged = Fields::new();
        for layer in &self.stack {
            merged.merge(layer);
        }
        merged
    }

    fn derive(&self, stack: Vec<Arc<Fields>>) -> Self {
        Self {
            logger: self.logger.clone(),
            name: self.name.clone(),
            stack,
            message: self.message.clone(),
            start: self.start,
        }
    }

    fn push_layer(&self, layer: Fields) -> Self {
        let mut stack = Vec::with_capacity(self.stack.len() + 1);
        stack.extend(self.stack.iter().cloned());
        stack.push(Arc::new(layer));
        self.derive(stack)
    }

    /// New entry with `fields` layered on top of this one's.
    #[must_use]
    pub fn with_fields<F: Fielder + ?Sized>(&self, fields: &F) -> Entry {
        self.push_layer(fields.fields())
    }

    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Entry
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.push_layer(Fields::new().with_field(key, value))
    }

    /// Sets `"duration"` to the whole number of milliseconds in `d`.
    #[must_use]
    pub fn with_duration(&self, d: Duration) -> Entry {
        let millis = i64::try_from(d.as_millis()).unwrap_or(i64::MAX);
        self.with_field(DURATION_KEY, millis)
    }

    /// Sets `"error"` to `err`. `None` yields an identical entry, so call
    /// sites can chain `.with_error(result.as_ref().err())` unconditionally.
    #[must_use]
    pub fn with_error<E: Error + ?Sized>(&self, err: Option<&E>) -> Entry {
        match err {
            None => self.clone(),
            Some(err) => self.with_field(ERROR_KEY, ErrorValue::new(err)),
        }
    }

    /// Like [`Entry::with_error`], additionally layering the error's own
    /// fields above `"error"`.
    #[must_use]
    pub fn with_structured_error<E: Error + Fielder + ?Sized>(&self, err: Option<&E>) -> Entry {
        match err {
            None => self.clone(),
            Some(err) => self.with_error(Some(err)).with_fields(err),
        }
    }

    /// New entry named `parent/name`, or just `name` when unnamed.
    #[must_use]
    pub fn named(&self, name: &str) -> Entry {
        let mut entry = self.derive(self.stack.clone());
        entry.name = Some(match &self.name {
            Some(parent) => format!("{}/{}", parent, name),
            None => name.to_string(),
        });
        entry
    }

    /// Builds the immutable record passed to handlers.
    pub(crate) fn finalize(
        &self,
        level: LogLevel,
        message: String,
        timestamp: DateTime<Utc>,
    ) -> LogEntry {
        LogEntry {
            name: self.name.clone(),
            fields: self.fields(),
            level,
            timestamp,
            message,
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.logger.dispatch(level, self, || message.into());
    }

    /// Formatted emission; `args` is only rendered when `level` is enabled.
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.logger.dispatch(level, self, || args.to_string());
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Emits at Fatal, then exits the process with status 1.
    pub fn fatal(&self, message: impl Into<String>) -> ! {
        self.log(LogLevel::Fatal, message);
        std::process::exit(1)
    }

    #[inline]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Debug, args);
    }

    #[inline]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    #[inline]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Warn, args);
    }

    #[inline]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Error, args);
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logf(LogLevel::Fatal, args);
        std::process::exit(1)
    }

    /// Logs `message` at Info and returns an entry whose [`Entry::stop`]
    /// emits the completion record with the elapsed `"duration"`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_structured_logger::prelude::*;
    ///
    /// let memory = MemoryHandler::new();
    /// let logger = Logger::new(memory.clone());
    ///
    /// let trace = logger.with_field("file", "a.txt").trace("upload");
    /// let outcome: std::io::Result<()> = Ok(());
    /// trace.stop_result(&outcome);
    ///
    /// let entries = memory.entries();
    /// assert_eq!(entries.len(), 2);
    /// assert!(entries[1].fields.contains_key("duration"));
    /// ```
    #[must_use = "call `stop` on the returned entry to log the completion"]
    pub fn trace(&self, message: impl Into<String>) -> Entry {
        let message = message.into();
        self.info(message.clone());

        Entry {
            logger: self.logger.clone(),
            name: self.name.clone(),
            stack: vec![Arc::new(self.fields())],
            message,
            start: Some(self.logger.now()),
        }
    }

    /// Time since [`Entry::trace`]; zero for entries that were not traced.
    pub fn elapsed(&self) -> Duration {
        self.start
            .and_then(|start| (self.logger.now() - start).to_std().ok())
            .unwrap_or_default()
    }

    /// Completes a trace: Info on success (`None`), Error with `"error"` set
    /// otherwise. Both carry `"duration"` and the traced message.
    pub fn stop<E: Error + ?Sized>(&self, err: Option<&E>) {
        let done = self.with_duration(self.elapsed());
        match err {
            None => done.info(self.message.clone()),
            Some(err) => done.with_error(Some(err)).error(self.message.clone()),
        }
    }

    /// Like [`Entry::stop`], also layering the error's own fields.
    pub fn stop_structured<E: Error + Fielder + ?Sized>(&self, err: Option<&E>) {
        let done = self.with_duration(self.elapsed());
        match err {
            None => done.info(self.message.clone()),
            Some(err) => done
                .with_structured_error(Some(err))
                .error(self.message.clone()),
        }
    }

    pub fn stop_result<T, E: Error>(&self, result: &Result<T, E>) {
        self.stop(result.as_ref().err());
    }

    pub fn stop_result_structured<T, E: Error + Fielder>(&self, result: &Result<T, E>) {
        self.stop_structured(result.as_ref().err());
    }

    /// Runs `op` inside a trace bracket and returns its result.
    pub fn traced<T, E, F>(&self, message: impl Into<String>, op: F) -> Result<T, E>
    where
        E: Error,
        F: FnOnce() -> Result<T, E>,
    {
        let trace = self.trace(message);
        let result = op();
        trace.stop_result(&result);
        result
    }

    /// Like [`Entry::traced`], for errors carrying their own fields.
    pub fn traced_structured<T, E, F>(&self, message: impl Into<String>, op: F) -> Result<T, E>
    where
        E: Error + Fielder,
        F: FnOnce() -> Result<T, E>,
    {
        let trace = self.trace(message);
        let result = op();
        trace.stop_result_structured(&result);
        result
    }
}

impl Fielder for Entry {
    fn fields(&self) -> Fields {
        Entry::fields(self)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("stack", &self.stack)
            .field("message", &self.message)
            .field("start", &self.start)
            .finish()
    }
}
