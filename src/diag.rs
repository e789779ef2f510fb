//! Diagnostic log sinks.
//!
//! Every pipeline stage records its outcome as one timestamped line:
//!
//! ```text
//! 2026-08-31T14:07 validation of input document order.xml against schema order-schema.xml succeeded
//! ```
//!
//! The sink is handed to the runner explicitly rather than reached
//! through a global, so tests capture diagnostics with [`MemoryLog`]
//! while production appends to a [`FileLog`].

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;

/// Append-only sink for pipeline diagnostics.
///
/// Implementations prefix each message with a local ISO-8601 timestamp
/// at minute precision and must serialize concurrent appends so lines
/// never interleave.
pub trait DiagnosticSink: Send + Sync {
    /// Append one diagnostic message.
    fn append(&self, message: &str) -> io::Result<()>;
}

/// Format the timestamp prefix for one diagnostic line.
fn timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M").to_string()
}

/// Diagnostic sink appending to a log file.
///
/// The file is opened in append mode and each line is written with a
/// single `write_all` behind a mutex, so in-process writers are
/// serialized and appends from separate processes land whole.
#[derive(Debug)]
pub struct FileLog {
    file: Mutex<File>,
}

impl FileLog {
    /// Open (creating if needed) the log file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DiagnosticSink for FileLog {
    fn append(&self, message: &str) -> io::Result<()> {
        let line = format!("{} {}\n", timestamp(), message);
        let mut file = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(line.as_bytes())?;
        file.flush()
    }
}

/// In-memory diagnostic sink for tests.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    /// Create an empty in-memory log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the appended lines, timestamps included.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Messages with the timestamp prefix stripped.
    pub fn messages(&self) -> Vec<String> {
        self.lines()
            .iter()
            .map(|line| match line.split_once(' ') {
                Some((_, message)) => message.to_string(),
                None => line.clone(),
            })
            .collect()
    }

    /// Number of appended lines.
    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemoryLog {
    fn append(&self, message: &str) -> io::Result<()> {
        let line = format!("{} {}", timestamp(), message);
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line);
        Ok(())
    }
}
