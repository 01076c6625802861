//! Prediction Log Record
//!
//! One CSV row per prediction: local timestamp, the six inputs, and the
//! clamped output.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::logic::inputs::{InputVector, FEATURE_COUNT};
use crate::logic::predictor::PredictionResult;

/// CSV header row
pub const HEADER: &str = "Time,Steam Flow,HRH P,HRH T,Main Steam P,HP Temp,Ambient,Predicted MW";

/// Number of CSV columns
pub const COLUMN_COUNT: usize = FEATURE_COUNT + 2;

/// Timestamp format, second precision
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A logged prediction, immutable once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(with = "log_time")]
    pub time: NaiveDateTime,
    #[serde(flatten)]
    pub input: InputVector,
    pub predicted_mw: f32,
}

impl LogRecord {
    pub fn new(time: NaiveDateTime, input: InputVector, predicted_mw: f32) -> Self {
        // Rows carry second precision
        let time = time.with_nanosecond(0).unwrap_or(time);
        Self { time, input, predicted_mw }
    }

    /// Record a prediction at the current local time
    pub fn now(input: InputVector, result: &PredictionResult) -> Self {
        Self::new(Local::now().naive_local(), input, result.predicted_mw)
    }

    pub fn time_string(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }

    /// CSV row without line terminator
    pub fn to_row(&self) -> String {
        let mut fields = Vec::with_capacity(COLUMN_COUNT);
        fields.push(self.time_string());
        fields.extend(self.input.as_array().iter().map(|v| v.to_string()));
        fields.push(self.predicted_mw.to_string());
        fields.join(",")
    }

    /// Parse one CSV row written by `to_row`
    pub fn parse_row(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != COLUMN_COUNT {
            return Err(format!("expected {} fields, found {}", COLUMN_COUNT, fields.len()));
        }

        let time = NaiveDateTime::parse_from_str(fields[0], TIME_FORMAT)
            .map_err(|e| format!("bad timestamp `{}`: {}", fields[0], e))?;

        let mut numbers = [0.0f32; COLUMN_COUNT - 1];
        for (slot, raw) in numbers.iter_mut().zip(&fields[1..]) {
            *slot = raw.parse().map_err(|_| format!("bad number `{}`", raw))?;
        }

        let mut input = [0.0f32; FEATURE_COUNT];
        input.copy_from_slice(&numbers[..FEATURE_COUNT]);

        Ok(Self {
            time,
            input: InputVector::from_array(input),
            predicted_mw: numbers[FEATURE_COUNT],
        })
    }
}

/// Parse a whole log file. Blank lines are skipped; anything else that is
/// not the header or a valid row is reported with its 1-based line number.
pub fn parse_log(content: &str) -> Result<Vec<LogRecord>, (usize, String)> {
    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    match lines.next() {
        None => return Ok(Vec::new()),
        Some((_, header)) if header.trim_start_matches('\u{feff}').trim() == HEADER => {}
        Some((i, header)) => return Err((i + 1, format!("unexpected header `{}`", header))),
    }

    lines
        .map(|(i, line)| LogRecord::parse_row(line).map_err(|reason| (i + 1, reason)))
        .collect()
}

mod log_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_row_layout() {
        let record = LogRecord::new(at(9, 5, 7), InputVector::default(), 245.5);
        assert_eq!(record.to_row(), "2025-08-20 09:05:07,850,4,525,16,538,25,245.5");
    }

    #[test]
    fn test_header_has_eight_columns() {
        assert_eq!(HEADER.split(',').count(), COLUMN_COUNT);
        assert_eq!(COLUMN_COUNT, 8);
    }

    #[test]
    fn test_parse_row_accepts_written_row() {
        let input = InputVector::from_array([612.25, 3.11, 401.0, 12.5, 539.0, -3.75]);
        let record = LogRecord::new(at(23, 59, 59), input, 187.123);

        let parsed = LogRecord::parse_row(&record.to_row()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_new_truncates_to_seconds() {
        let precise = at(10, 0, 0) + chrono::Duration::milliseconds(750);
        let record = LogRecord::new(precise, InputVector::default(), 200.0);
        assert_eq!(record.time, at(10, 0, 0));
    }

    #[test]
    fn test_parse_row_rejects_garbage() {
        assert!(LogRecord::parse_row("2025-08-20 09:05:07,850,4,525").is_err());
        assert!(LogRecord::parse_row("yesterday,850,4,525,16,538,25,245.5").is_err());
        assert!(LogRecord::parse_row("2025-08-20 09:05:07,850,x,525,16,538,25,245.5").is_err());
    }

    #[test]
    fn test_parse_log_reports_line_numbers() {
        let content = format!("{}\n2025-08-20 09:05:07,850,4,525,16,538,25,245.5\nbroken\n", HEADER);
        let (line, _) = parse_log(&content).unwrap_err();
        assert_eq!(line, 3);

        let (line, reason) = parse_log("a,b,c\n").unwrap_err();
        assert_eq!(line, 1);
        assert!(reason.contains("header"));
    }

    #[test]
    fn test_parse_log_handles_crlf_and_blank_lines() {
        let content = format!("{}\r\n\r\n2025-08-20 09:05:07,850,4,525,16,538,25,245.5\r\n", HEADER);
        let records = parse_log(&content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].predicted_mw, 245.5);
    }

    #[test]
    fn test_json_uses_log_time_format() {
        let record = LogRecord::new(at(9, 5, 7), InputVector::default(), 245.5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["time"], "2025-08-20 09:05:07");
        assert_eq!(json["steam_flow"], 850.0);
    }
}
