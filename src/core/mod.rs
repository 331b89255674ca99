//! Core logger types and traits

pub mod clock;
pub mod config;
pub mod entry;
pub mod error;
pub mod fields;
pub mod handler;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod timestamp;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LoggerConfig, OutputFormat};
pub use entry::{Entry, DURATION_KEY, ERROR_KEY};
pub use error::{LoggerError, Result};
pub use fields::{ErrorValue, FieldValue, Fielder, Fields};
pub use handler::{Handler, HandlerFn};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{HandlerErrorCallback, Logger, LoggerBuilder};
pub use timestamp::TimestampFormat;
