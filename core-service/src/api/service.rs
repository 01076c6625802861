//! Prediction Service - entry point for front-ends
//!
//! Ties the inference engine and the prediction log together: a submit
//! predicts, then logs. A failed log write never hides the prediction.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{InferenceError, LogError};
use crate::logic::inputs::InputVector;
use crate::logic::model::{EngineStatus, InferenceEngine};
use crate::logic::predictor::{self, PredictionResult};
use crate::logic::telemetry::{self, ClearOutcome, LogExport, LogRecord, PredictionLog};

/// Outcome of one submit
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub result: PredictionResult,
    pub record: LogRecord,
    /// Set when the record could not be appended to the log
    pub log_warning: Option<String>,
}

impl Submission {
    pub fn logged(&self) -> bool {
        self.log_warning.is_none()
    }
}

/// Shared by every request of a process
#[derive(Clone)]
pub struct PredictionService {
    engine: Arc<dyn InferenceEngine>,
    log: Arc<PredictionLog>,
}

impl PredictionService {
    pub fn new(engine: Arc<dyn InferenceEngine>, log: Arc<PredictionLog>) -> Self {
        Self { engine, log }
    }

    pub fn log(&self) -> &PredictionLog {
        &self.log
    }

    pub fn engine_status(&self) -> EngineStatus {
        self.engine.status()
    }

    /// Predict, then append the record to the log
    pub fn submit(&self, input: InputVector) -> Result<Submission, InferenceError> {
        let result = predictor::predict(self.engine.as_ref(), &input)?;
        let record = LogRecord::now(input, &result);

        let log_warning = match self.log.append(&record) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Prediction not logged: {}", e);
                Some(e.to_string())
            }
        };

        Ok(Submission { result, record, log_warning })
    }

    pub fn read_log(&self) -> Result<Option<Vec<LogRecord>>, LogError> {
        self.log.read_all()
    }

    pub fn export_log(&self) -> Result<Option<LogExport>, LogError> {
        telemetry::export_log(&self.log)
    }

    pub fn clear_log(&self) -> Result<ClearOutcome, LogError> {
        self.log.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::predictor::tests::FixedEngine;
    use crate::logic::telemetry::HEADER;
    use tempfile::TempDir;

    fn service(dir: &TempDir, raw: f32) -> PredictionService {
        PredictionService::new(
            Arc::new(FixedEngine::new(raw)),
            Arc::new(PredictionLog::new(dir.path().join("unit2_log.csv"))),
        )
    }

    #[test]
    fn test_submit_predicts_and_logs() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir, 310.0);

        let submission = service.submit(InputVector::default()).unwrap();
        assert!(submission.logged());
        assert_eq!(submission.result.predicted_mw, 290.0);
        assert_eq!(submission.result.display(), "290.00 MW");

        let records = service.read_log().unwrap().unwrap();
        assert_eq!(records, vec![submission.record]);
        assert_eq!(records[0].predicted_mw, 290.0);
    }

    #[test]
    fn test_default_scenario_creates_file_with_header() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir, 243.21);

        service.submit(InputVector::from_array([850.0, 4.0, 525.0, 16.0, 538.0, 25.0])).unwrap();

        let content = std::fs::read_to_string(service.log().path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(HEADER));
        let row = lines.next().unwrap();
        assert!(row.ends_with(",850,4,525,16,538,25,243.21"), "{}", row);
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_log_failure_keeps_prediction() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("unit2_log.csv")).unwrap();
        let service = service(&temp_dir, 50.0);

        let submission = service.submit(InputVector::default()).unwrap();
        assert!(!submission.logged());
        assert_eq!(submission.result.predicted_mw, 140.0);
        assert!(submission.log_warning.unwrap().contains("Could not write log"));
    }

    #[test]
    fn test_clear_and_export() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir, 200.0);

        assert!(service.export_log().unwrap().is_none());
        service.submit(InputVector::default()).unwrap();
        assert_eq!(service.export_log().unwrap().unwrap().rows, 1);

        assert_eq!(service.clear_log().unwrap(), ClearOutcome::Cleared);
        assert!(service.read_log().unwrap().is_none());
        assert_eq!(service.engine_status().inference_count, 1);
    }
}
