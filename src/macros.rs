//! Logging macros with deferred formatting.
//!
//! Each macro accepts a `Logger` or an `Entry` and a `format!`-style
//! message. The message is only rendered when the level is enabled.
//!
//! # Examples
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use rust_structured_logger::info;
//!
//! let memory = MemoryHandler::new();
//! let logger = Logger::new(memory.clone());
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port);
//! info!(logger.named("http"), "ready");
//!
//! assert_eq!(memory.entries()[0].message, "listening on port 8080");
//! ```

/// Log a formatted message at an explicit level.
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::new(MemoryHandler::new());
/// use rust_structured_logger::log;
/// log!(logger, LogLevel::Warn, "disk at {}%", 91);
/// ```
#[macro_export]
macro_rules! log {
    ($target:expr, $level:expr, $($arg:tt)+) => {
        $target.logf($level, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log at Fatal, then exit the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($target:expr, $($arg:tt)+) => {
        $target.fatalf(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};
    use crate::handlers::MemoryHandler;

    #[test]
    fn test_log_macro() {
        let memory = MemoryHandler::new();
        let logger = Logger::new(memory.clone());
        log!(logger, LogLevel::Error, "code {}", 500);
        assert_eq!(memory.last().unwrap().message, "code 500");
        assert_eq!(memory.last().unwrap().level, LogLevel::Error);
    }

    #[test]
    fn test_level_macros() {
        let memory = MemoryHandler::new();
        let logger = Logger::new(memory.clone());
        logger.set_level(LogLevel::Debug);

        debug!(logger, "debug {}", 1);
        info!(logger, "info {}", 2);
        warn!(logger, "warn {}", 3);
        error!(logger, "error {}", 4);

        let levels: Vec<LogLevel> = memory.entries().iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
        );
    }

    #[test]
    fn test_macros_accept_entries() {
        let memory = MemoryHandler::new();
        let logger = Logger::new(memory.clone());
        let entry = logger.named("worker").with_field("id", 7);

        warn!(entry, "stalled for {}s", 30);
        debug!(entry, "filtered");

        let record = memory.last().unwrap();
        assert_eq!(memory.len(), 1);
        assert_eq!(record.name.as_deref(), Some("worker"));
        assert_eq!(record.message, "stalled for 30s");
    }
}
