//! Prediction API handler

use axum::{extract::State, Json};
use serde::Serialize;

use unit2_core::LogRecord;

use super::blocking;
use crate::models::Readings;
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Clamped output, MW
    pub predicted_mw: f32,
    /// `245.67 MW`
    pub display: String,
    pub raw_output: f32,
    pub inference_time_us: u64,
    pub record: LogRecord,
    pub logged: bool,
    pub log_warning: Option<String>,
}

/// Predict from JSON readings and log the result
pub async fn predict(
    State(state): State<AppState>,
    Json(readings): Json<Readings>,
) -> AppResult<Json<PredictResponse>> {
    let input = readings.validated()?;

    let service = state.service.clone();
    let submission = blocking(move || service.submit(input)).await??;

    tracing::info!(
        predicted_mw = submission.result.predicted_mw,
        raw_output = submission.result.raw_output,
        logged = submission.logged(),
        "Prediction served"
    );

    Ok(Json(PredictResponse {
        predicted_mw: submission.result.predicted_mw,
        display: submission.result.display(),
        raw_output: submission.result.raw_output,
        inference_time_us: submission.result.inference_time_us,
        logged: submission.logged(),
        record: submission.record,
        log_warning: submission.log_warning,
    }))
}
