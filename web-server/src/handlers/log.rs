//! Prediction log handlers

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use unit2_core::{ClearOutcome, LogRecord};

use super::blocking;
use crate::{AppError, AppResult, AppState};

const NO_LOG: &str = "No predictions logged yet";

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub count: usize,
    pub records: Vec<LogRecord>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
    pub outcome: ClearOutcome,
    pub message: &'static str,
}

/// Download the log as `unit2_log.csv`
pub async fn download(State(state): State<AppState>) -> AppResult<Response> {
    let service = state.service.clone();
    let export = blocking(move || service.export_log())
        .await??
        .ok_or_else(|| AppError::NotFound(NO_LOG.to_string()))?;

    tracing::debug!("Exporting {} log rows", export.rows);

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, export.mime.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}

/// All log records as JSON
pub async fn list(State(state): State<AppState>) -> AppResult<Json<LogResponse>> {
    let service = state.service.clone();
    let records = blocking(move || service.read_log())
        .await??
        .ok_or_else(|| AppError::NotFound(NO_LOG.to_string()))?;

    Ok(Json(LogResponse {
        count: records.len(),
        records,
    }))
}

/// Delete the log file
pub async fn clear(State(state): State<AppState>) -> AppResult<Json<ClearResponse>> {
    let service = state.service.clone();
    let outcome = blocking(move || service.clear_log()).await??;

    Ok(Json(ClearResponse {
        cleared: outcome == ClearOutcome::Cleared,
        outcome,
        message: outcome.message(),
    }))
}
