//! Main logger implementation

use super::{
    clock::{Clock, SystemClock},
    entry::Entry,
    error::{LoggerError, Result},
    fields::{FieldValue, Fielder},
    handler::Handler,
    log_level::LogLevel,
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Callback receiving handler failures instead of the default stderr line.
pub type HandlerErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

struct LoggerInner {
    handler: Arc<dyn Handler>,
    min_level: RwLock<LogLevel>,
    clock: Arc<dyn Clock>,
    on_handler_error: Option<HandlerErrorCallback>,
}

/// Owns a handler and a severity threshold.
///
/// `Logger` is a cheap handle: clones share the handler, the clock and the
/// threshold, which is what lets every [`Entry`] carry its logger along.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Logger writing to `handler` with an Info threshold and the system clock.
    pub fn new<H: Handler + 'static>(handler: H) -> Self {
        Self::with_handler_arc(Arc::new(handler))
    }

    pub fn with_handler_arc(handler: Arc<dyn Handler>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                handler,
                min_level: RwLock::new(LogLevel::Info),
                clock: Arc::new(SystemClock),
                on_handler_error: None,
            }),
        }
    }

    pub fn level(&self) -> LogLevel {
        *self.inner.min_level.read()
    }

    /// Changes the threshold for this logger and all of its clones.
    pub fn set_level(&self, level: LogLevel) {
        *self.inner.min_level.write() = level;
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.inner.clock.now()
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.inner.handler
    }

    /// Fresh, empty entry owned by this logger.
    pub fn entry(&self) -> Entry {
        Entry::new(self)
    }

    /// Gate, finalize and hand `entry` to the handler. The message is only
    /// built once the level check has passed.
    pub(crate) fn dispatch<M>(&self, level: LogLevel, entry: &Entry, message: M)
    where
        M: FnOnce() -> String,
    {
        if level < self.level() {
            return;
        }

        let record = entry.finalize(level, message(), self.now());
        if let Err(e) = self.inner.handler.handle_log(&record) {
            self.report_handler_error(&e);
        }
    }

    fn report_handler_error(&self, err: &LoggerError) {
        match &self.inner.on_handler_error {
            Some(callback) => callback(err),
            None => eprintln!("[LOGGER ERROR] error logging: {}", err),
        }
    }

    #[must_use]
    pub fn with_fields<F: Fielder + ?Sized>(&self, fields: &F) -> Entry {
        self.entry().with_fields(fields)
    }

    /// Keys should not contain spaces; use snake_case.
    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Entry
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.entry().with_field(key, value)
    }

    #[must_use]
    pub fn with_duration(&self, d: Duration) -> Entry {
        self.entry().with_duration(d)
    }

    #[must_use]
    pub fn with_error<E: Error + ?Sized>(&self, err: Option<&E>) -> Entry {
        self.entry().with_error(err)
    }

    #[must_use]
    pub fn with_structured_error<E: Error + Fielder + ?Sized>(&self, err: Option<&E>) -> Entry {
        self.entry().with_structured_error(err)
    }

    #[must_use]
    pub fn named(&self, name: &str) -> Entry {
        self.entry().named(name)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.dispatch(level, &self.entry(), || message.into());
    }

    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.dispatch(level, &self.entry(), || args.to_string());
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

    pub fn fatal(&self, message: impl Into<String>) -> ! {
        self.entry().fatal(message)
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
        self.entry().fatalf(args)
    }

    #[must_use = "call `stop` on the returned entry to log the completion"]
    pub fn trace(&self, message: impl Into<String>) -> Entry {
        self.entry().trace(message)
    }

    pub fn traced<T, E, F>(&self, message: impl Into<String>, op: F) -> std::result::Result<T, E>
    where
        E: Error,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        self.entry().traced(message, op)
    }

    pub fn traced_structured<T, E, F>(
        &self,
        message: impl Into<String>,
        op: F,
    ) -> std::result::Result<T, E>
    where
        E: Error + Fielder,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        self.entry().traced_structured(message, op)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.level())
            .field("on_handler_error", &self.inner.on_handler_error.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_structured_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .handler(MemoryHandler::new())
///     .on_handler_error(Arc::new(|err: &LoggerError| {
///         eprintln!("ALERT: {}", err);
///     }))
///     .build()
///     .unwrap();
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    handler: Option<Arc<dyn Handler>>,
    clock: Arc<dyn Clock>,
    on_handler_error: Option<HandlerErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            handler: None,
            clock: Arc::new(SystemClock),
            on_handler_error: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the handler records are delivered to
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Set a handler that is shared with other owners
    #[must_use = "builder methods return a new value"]
    pub fn handler_arc(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Replace the time source used for timestamps and trace durations
    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock_arc(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set a callback for handler failures
    ///
    /// Without one, failures are printed to stderr. Either way they never
    /// reach the code that emitted the record.
    #[must_use = "builder methods return a new value"]
    pub fn on_handler_error(mut self, callback: HandlerErrorCallback) -> Self {
        self.on_handler_error = Some(callback);
        self
    }

    /// Build the Logger. Fails when no handler was set.
    pub fn build(self) -> Result<Logger> {
        let handler = self
            .handler
            .ok_or_else(|| LoggerError::config("Logger", "a handler is required"))?;

        Ok(Logger {
            inner: Arc::new(LoggerInner {
                handler,
                min_level: RwLock::new(self.min_level),
                clock: self.clock,
                on_handler_error: self.on_handler_error,
            }),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
