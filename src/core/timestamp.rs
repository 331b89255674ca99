//! Timestamp rendering for line-oriented handlers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a handler renders `LogEntry::timestamp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// `2025-01-08T10:30:45.123456Z`
    #[default]
    Iso8601Micros,

    /// `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Seconds since the epoch
    Unix,

    /// Milliseconds since the epoch
    UnixMillis,

    /// Microseconds since the epoch
    UnixMicros,

    /// Any strftime-compatible pattern, e.g. `"%d/%b/%Y:%H:%M:%S %z"`
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(pattern) => datetime.format(pattern).to_string(),
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}
