//! Console handler implementation

use crate::core::{FieldValue, Handler, LogEntry, LoggerError, Result, TimestampFormat, ERROR_KEY};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;

/// Human-readable, one record per line:
///
/// ```text
/// 2025-01-08T10:30:45.123456Z  INFO db/pool: connected host="db1" port="5432"
/// ```
///
/// Fields are printed in key order. Writes are serialized by an internal
/// mutex, so one handler can be shared by every thread of an application.
pub struct ConsoleHandler {
    writer: Mutex<Box<dyn Write + Send>>,
    use_colors: bool,
    error_chain: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleHandler {
    /// Plain (uncoloured) output to `writer`.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            use_colors: false,
            error_chain: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Coloured output to stderr.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr()).with_colors(true)
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Print the cause chain of an `"error"` field below the record.
    #[must_use]
    pub fn with_error_chain(mut self, enabled: bool) -> Self {
        self.error_chain = enabled;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn muted(&self, text: &str) -> String {
        if self.use_colors {
            text.bright_black().to_string()
        } else {
            text.to_string()
        }
    }

    /// Render `entry` exactly as `handle_log` writes it, trailing newline
    /// included.
    pub fn format(&self, entry: &LogEntry) -> String {
        let mut parts = Vec::with_capacity(4 + entry.fields.len());

        parts.push(self.muted(&self.timestamp_format.format(&entry.timestamp)));
        parts.push(if self.use_colors {
            entry
                .level
                .padded()
                .color(entry.level.color_code())
                .bold()
                .to_string()
        } else {
            entry.level.padded().to_string()
        });

        if let Some(name) = &entry.name {
            parts.push(self.muted(&format!("{}:", name)));
        }
        if !entry.message.is_empty() {
            parts.push(entry.sanitized_message());
        }

        for (key, value) in entry.fields.sorted() {
            let rendered = match value {
                FieldValue::Null => String::new(),
                other => other.to_string(),
            };
            let key = if self.use_colors {
                key.italic().to_string()
            } else {
                key.to_string()
            };
            parts.push(format!("{}{}\"{}\"", key, self.muted("="), rendered));
        }

        let mut line = parts.join(" ");
        line.push('\n');

        if self.error_chain {
            if let Some(err) = entry.fields.get(ERROR_KEY).and_then(FieldValue::as_error) {
                if !err.chain().is_empty() {
                    let header = if self.use_colors {
                        "Caused by:".red().bold().to_string()
                    } else {
                        "Caused by:".to_string()
                    };
                    line.push_str(&header);
                    line.push('\n');
                    for (idx, cause) in err.chain().iter().enumerate() {
                        line.push_str(&format!("    {}: {}\n", idx, cause));
                    }
                }
            }
        }

        line
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Handler for ConsoleHandler {
    fn handle_log(&self, entry: &LogEntry) -> Result<()> {
        let line = self.format(entry);

        let mut writer = self.writer.lock();
        writer
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::io_operation("writing console record", "write failed", e))?;
        writer.flush()?;
        Ok(())
    }
}
