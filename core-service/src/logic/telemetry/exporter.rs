//! Prediction Log Exporter
//!
//! Renders records back to the log's CSV layout for download.

use super::record::{LogRecord, HEADER};
use super::recorder::PredictionLog;
use crate::constants::{EXPORT_FILE_NAME, EXPORT_MIME};
use crate::error::LogError;

/// A downloadable copy of the log
#[derive(Debug, Clone)]
pub struct LogExport {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

/// Render records as CSV text (header + one row per record)
pub fn render_csv(records: &[LogRecord]) -> String {
    let mut csv = String::with_capacity(HEADER.len() + records.len() * 64);
    csv.push_str(HEADER);
    csv.push('\n');
    for record in records {
        csv.push_str(&record.to_row());
        csv.push('\n');
    }
    csv
}

/// Export the whole log as UTF-8 CSV. `Ok(None)` when there is no log.
pub fn export_log(log: &PredictionLog) -> Result<Option<LogExport>, LogError> {
    let Some(records) = log.read_all()? else {
        return Ok(None);
    };

    Ok(Some(LogExport {
        file_name: EXPORT_FILE_NAME,
        mime: EXPORT_MIME,
        bytes: render_csv(&records).into_bytes(),
        rows: records.len(),
    }))
}
