//! JSON handler for structured logging

use crate::core::{Handler, LogEntry, Result};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes each record as a single-line JSON object (JSONL format)
///
/// ```text
/// {"name":"db","fields":{"user":"a"},"level":"info","timestamp":"2025-01-08T10:30:45Z","message":"hello"}
/// ```
pub struct JsonHandler {
    writer: Mutex<Box<dyn Write + Send>>,
    pretty: bool,
}

impl JsonHandler {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            pretty: false,
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Append to the file at `path`, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Ok(Self::new(BufWriter::new(file)))
    }

    /// Multi-line, indented objects
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Handler for JsonHandler {
    fn handle_log(&self, entry: &LogEntry) -> Result<()> {
        let json = if self.pretty {
            entry.to_json_pretty()?
        } else {
            entry.to_json()?
        };

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        writer.flush()?;
        Ok(())
    }
}
