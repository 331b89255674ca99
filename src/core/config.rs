//! Declarative logger configuration
//!
//! `LoggerConfig` can be deserialized from an application's config file and
//! turned into a ready `Logger` writing to stderr.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::Logger;
use super::timestamp::TimestampFormat;
use crate::handlers::{JsonHandler, LegacyHandler};
use serde::Deserialize;

/// Output handler selected by configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable console lines
    ///
    /// Example: `2025-01-08T10:30:45.123456Z  INFO http: served status="200"`
    #[default]
    Console,

    /// One JSON object per line
    Json,

    /// Forward to the `log` crate facade
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: OutputFormat,
    pub colors: bool,
    /// Print the `"error"` field's cause chain under console records
    pub error_chain: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: OutputFormat::Console,
            colors: true,
            error_chain: false,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a logger writing to stderr in the configured format
    pub fn into_logger(self) -> Result<Logger> {
        let builder = Logger::builder().min_level(self.level);

        let builder = match self.format {
            #[cfg(feature = "console")]
            OutputFormat::Console => builder.handler(
                crate::handlers::ConsoleHandler::stderr()
                    .with_colors(self.colors)
                    .with_error_chain(self.error_chain)
                    .with_timestamp_format(self.timestamp_format),
            ),
            #[cfg(not(feature = "console"))]
            OutputFormat::Console => {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    "console output requires the `console` feature",
                ))
            }
            OutputFormat::Json => builder.handler(JsonHandler::stderr()),
            OutputFormat::Legacy => builder.handler(LegacyHandler::new()),
        };

        builder.build()
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "legacy" | "log" => Ok(OutputFormat::Legacy),
            other => Err(LoggerError::config(
                "OutputFormat",
                format!("unknown format '{}'", other),
            )),
        }
    }
}
