//! # Rust Structured Logger
//!
//! A structured logging core: callers build leveled records with attached
//! key/value context and hand finished records to a pluggable handler.
//!
//! ## Features
//!
//! - **Chained Entries**: `with_field`, `with_error`, `named` each return a new
//!   entry layered on the previous one, so context can be shared freely
//! - **Level Gating**: calls below the logger's threshold do no work at all
//! - **Trace Brackets**: `trace`/`stop` log the start and the timed outcome of
//!   an operation
//! - **Pluggable Handlers**: console, JSON, `log` facade, fan-out and
//!   in-memory handlers, or any type implementing `Handler`
//!
//! ```
//! use rust_structured_logger::prelude::*;
//!
//! let memory = MemoryHandler::new();
//! let logger = Logger::new(memory.clone());
//!
//! let db = logger.named("db").with_field("host", "db1");
//! db.debug("not shown at the default Info threshold");
//! db.named("pool").info("connected");
//!
//! let record = memory.last().unwrap();
//! assert_eq!(record.name.as_deref(), Some("db/pool"));
//! assert_eq!(record.fields.names(), vec!["host"]);
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::handlers::ConsoleHandler;
    pub use crate::handlers::{JsonHandler, LegacyHandler, MemoryHandler, MultiHandler};
    pub use crate::core::{
        Clock, Entry, ErrorValue, FieldValue, Fielder, Fields, Handler, HandlerErrorCallback,
        HandlerFn, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        ManualClock, OutputFormat, Result, SystemClock, TimestampFormat,
    };
}

#[cfg(feature = "console")]
pub use handlers::ConsoleHandler;
pub use handlers::{JsonHandler, LegacyHandler, MemoryHandler, MultiHandler};
pub use core::{
    Clock, Entry, ErrorValue, FieldValue, Fielder, Fields, Handler, HandlerErrorCallback,
    HandlerFn, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, ManualClock,
    OutputFormat, Result, SystemClock, TimestampFormat, DURATION_KEY, ERROR_KEY,
};
