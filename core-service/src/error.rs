//! Error types for the predictor core

use std::path::PathBuf;

use thiserror::Error;

/// Model file could not be turned into an inference session.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load model {}: {reason}", path.display())]
    Session { path: PathBuf, reason: String },

    #[error("model {} declares no {slot} slot", path.display())]
    MissingSlot { path: PathBuf, slot: &'static str },
}

/// A single inference call failed.
#[derive(Debug, Error)]
#[error("InferenceError: {0}")]
pub struct InferenceError(pub String);

impl InferenceError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Prediction log I/O and parse failures.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Could not write log: {0}")]
    Write(#[source] std::io::Error),

    #[error("Could not read log: {0}")]
    Read(#[source] std::io::Error),

    #[error("Log is corrupt at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    #[error("Could not clear log: {0}")]
    Clear(#[source] std::io::Error),
}
