//! Prediction Log Recorder
//!
//! Append-only CSV file of prediction records.
//!
//! Writes from this process are serialised by a mutex. Other processes
//! writing the same file are not coordinated: one server per log file is a
//! deployment assumption.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;

use super::record::{parse_log, LogRecord, HEADER};
use crate::error::LogError;

/// Result of a clear request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearOutcome {
    Cleared,
    NothingToClear,
}

impl ClearOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ClearOutcome::Cleared => "✅ Log cleared successfully.",
            ClearOutcome::NothingToClear => "No log file to clear.",
        }
    }
}

/// CSV prediction log bound to one file path
#[derive(Debug)]
pub struct PredictionLog {
    path: PathBuf,
    io: Mutex<()>,
}

impl PredictionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header first if the file is new or empty
    pub fn append(&self, record: &LogRecord) -> Result<(), LogError> {
        let _guard = self.io.lock();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(LogError::Write)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(LogError::Write)?;

        let is_new = file.metadata().map_err(LogError::Write)?.len() == 0;
        let unterminated = !is_new && !ends_with_newline(&mut file).map_err(LogError::Write)?;

        let mut writer = BufWriter::new(file);
        if is_new {
            writeln!(writer, "{}", HEADER).map_err(LogError::Write)?;
            log::info!("Created prediction log: {:?}", self.path);
        } else if unterminated {
            // Last row was cut short or hand-edited; keep it on its own line
            log::warn!("Prediction log {:?} did not end with a newline", self.path);
            writeln!(writer).map_err(LogError::Write)?;
        }
        writeln!(writer, "{}", record.to_row()).map_err(LogError::Write)?;

        // Flush for durability
        writer.flush().map_err(LogError::Write)?;
        Ok(())
    }

    /// Read every record in append order.
    ///
    /// `Ok(None)` means there is no log file; a file that cannot be parsed is
    /// `LogError::Corrupt`, never `None`.
    pub fn read_all(&self) -> Result<Option<Vec<LogRecord>>, LogError> {
        let _guard = self.io.lock();

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(LogError::Corrupt { line: 0, reason: e.to_string() });
            }
            Err(e) => return Err(LogError::Read(e)),
        };

        parse_log(&content)
            .map(Some)
            .map_err(|(line, reason)| LogError::Corrupt { line, reason })
    }

    /// Delete the log file if it exists
    pub fn clear(&self) -> Result<ClearOutcome, LogError> {
        let _guard = self.io.lock();

        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Prediction log cleared: {:?}", self.path);
                Ok(ClearOutcome::Cleared)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ClearOutcome::NothingToClear),
            Err(e) => Err(LogError::Clear(e)),
        }
    }
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

// ============================================================================
// TESTS
// ============================================================================
