//! Logic Module - Prediction pipeline
//!
//! - `labels` - Bilingual display strings
//! - `inputs` - The six plant readings and their control ranges
//! - `model/` - ONNX inference engine and model card
//! - `predictor` - Inference + output clamping
//! - `telemetry/` - CSV prediction log

pub mod labels;
pub mod inputs;
pub mod model;
pub mod predictor;
pub mod telemetry;
