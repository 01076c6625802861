//! Unit 2 MW Predictor - Core
//!
//! Predicts Unit 2 active power output from six plant readings with a
//! pre-trained ONNX regression model, clamps it to the unit's physical range,
//! and keeps a CSV log of every prediction.
//!
//! ```text
//! labels ──► inputs ──► predictor ──► telemetry (CSV log)
//!                          │
//!                          ▼
//!                 model (ONNX session, memoized per path)
//! ```

pub mod api;
pub mod constants;
pub mod error;
pub mod logic;

pub use api::{PredictionService, Submission};
pub use error::{InferenceError, LogError, ModelLoadError};
pub use logic::inputs::{FieldSpec, InputVector, FEATURE_COUNT, FIELDS};
pub use logic::labels::{Labels, Language};
pub use logic::model::{get_handle, EngineProfile, EngineStatus, InferenceEngine, ModelCard, ModelHandle, SessionTuning};
pub use logic::predictor::{clamp_output, format_mw, predict, PredictionResult};
pub use logic::telemetry::{ClearOutcome, LogExport, LogRecord, PredictionLog};
