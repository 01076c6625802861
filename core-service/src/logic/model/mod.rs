//! Model Module - ONNX inference and model card
//!
//! Keeps the inference engine apart from prediction post-processing, so the
//! predictor can run against any `InferenceEngine`.

pub mod inference;
pub mod info;

// Re-export common types
pub use inference::{get_handle, EngineProfile, EngineStatus, InferenceEngine, ModelHandle, SessionTuning};
pub use info::{FeatureImportance, ModelCard};
