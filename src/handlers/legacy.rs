//! Adapter forwarding records to the `log` crate facade
//!
//! Lets this crate's entries flow into whatever `log` implementation the
//! application already installed (env_logger, syslog bridges and so on).

use crate::core::{Handler, LogEntry, LogLevel, Result};

/// Target used for records without a name.
pub const DEFAULT_TARGET: &str = "rust_structured_logger";

pub struct LegacyHandler {
    default_target: String,
}

impl LegacyHandler {
    pub fn new() -> Self {
        Self {
            default_target: DEFAULT_TARGET.to_string(),
        }
    }

    #[must_use]
    pub fn with_default_target(mut self, target: impl Into<String>) -> Self {
        self.default_target = target.into();
        self
    }

    /// Fatal has no `log` counterpart and is reported as Error.
    pub fn map_level(level: LogLevel) -> log::Level {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error | LogLevel::Fatal => log::Level::Error,
        }
    }

    /// `LEVEL message key=value ...`, level right-aligned to five columns and
    /// the message padded to 25.
    pub fn render(entry: &LogEntry) -> String {
        let mut line = format!("{:>5} {:<25}", entry.level.to_str(), entry.sanitized_message());
        for (key, value) in entry.fields.sorted() {
            line.push_str(&format!(" {}={}", key, value));
        }
        line
    }
}

impl Default for LegacyHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for LegacyHandler {
    fn handle_log(&self, entry: &LogEntry) -> Result<()> {
        let target = entry.name.as_deref().unwrap_or(&self.default_target);
        log::log!(target: target, Self::map_level(entry.level), "{}", Self::render(entry));
        Ok(())
    }
}
