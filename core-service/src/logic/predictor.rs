//! Predictor
//!
//! Runs one input row through an inference engine and clamps the output to
//! the physical range of Unit 2.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_OUTPUT_MW, MIN_OUTPUT_MW};
use crate::error::InferenceError;
use crate::logic::inputs::InputVector;
use crate::logic::model::InferenceEngine;

/// Prediction output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Clamped output in MW, always within [140, 290]
    pub predicted_mw: f32,
    /// Model output before clamping
    pub raw_output: f32,
    pub inference_time_us: u64,
}

impl PredictionResult {
    /// `245.67 MW`
    pub fn display(&self) -> String {
        format_mw(self.predicted_mw)
    }
}

/// Clamp a raw model output to [140.0, 290.0] MW
pub fn clamp_output(raw: f32) -> f32 {
    raw.clamp(MIN_OUTPUT_MW, MAX_OUTPUT_MW)
}

/// Two-decimal MW display string
pub fn format_mw(value: f32) -> String {
    format!("{:.2} MW", value)
}

/// Predict Unit 2 output for one input row.
///
/// No range validation happens here; the controls feeding `input` own that.
pub fn predict<E>(engine: &E, input: &InputVector) -> Result<PredictionResult, InferenceError>
where
    E: InferenceEngine + ?Sized,
{
    let start_time = std::time::Instant::now();
    let raw = engine.infer(&input.as_array())?;

    if raw.is_nan() {
        return Err(InferenceError::new("Model returned NaN"));
    }

    let predicted_mw = clamp_output(raw);
    if predicted_mw != raw {
        log::debug!("Raw output {} clamped to {}", raw, predicted_mw);
    }

    Ok(PredictionResult {
        predicted_mw,
        raw_output: raw,
        inference_time_us: start_time.elapsed().as_micros() as u64,
    })
}
