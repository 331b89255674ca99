//! Finalized log record handed to handlers

use super::fields::Fields;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A finished record: the flattened field stack plus level, message and
/// timestamp. Never changes after the logger builds it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub fields: Fields,
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    /// Replace newlines, carriage returns and tabs with escape sequences so
    /// one record always renders as one line.
    pub fn sanitized_message(&self) -> String {
        self.message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
