//! Telemetry Module
//!
//! The prediction log: every successful prediction becomes one CSV row.
//!
//! ## Structure
//! - `record.rs` - LogRecord and the CSV row layout
//! - `recorder.rs` - Append / read / clear against the log file
//! - `exporter.rs` - CSV download of the whole log

pub mod record;
pub mod recorder;
pub mod exporter;

// Re-export main types and functions
pub use record::{LogRecord, HEADER, TIME_FORMAT};
pub use recorder::{ClearOutcome, PredictionLog};
pub use exporter::{export_log, render_csv, LogExport};
