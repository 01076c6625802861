//! Central Configuration Constants
//!
//! Single source of truth for the predictor defaults.
//! Deployment overrides come from environment variables.

/// Default ONNX model file (relative to the working directory)
pub const DEFAULT_MODEL_PATH: &str = "unit2mwbig_model.onnx";

/// Default prediction log file
pub const DEFAULT_LOG_PATH: &str = "unit2_log.csv";

/// File name offered when the log is downloaded
pub const EXPORT_FILE_NAME: &str = "unit2_log.csv";

/// MIME type of the exported log
pub const EXPORT_MIME: &str = "text/csv";

/// Lower physical limit of Unit 2 active power output (MW)
pub const MIN_OUTPUT_MW: f32 = 140.0;

/// Upper physical limit of Unit 2 active power output (MW)
pub const MAX_OUTPUT_MW: f32 = 290.0;

/// Intra-op threads for the tuned session profile
pub const DEFAULT_INTRA_OP_THREADS: usize = 2;

/// Inter-op threads for the tuned session profile
pub const DEFAULT_INTER_OP_THREADS: usize = 1;

/// App name
pub const APP_NAME: &str = "Unit 2 MW Prediction";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get log path from environment or use default
pub fn get_log_path() -> String {
    std::env::var("LOG_PATH")
        .unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string())
}

/// Get intra-op thread count from environment or use default
pub fn get_intra_op_threads() -> usize {
    std::env::var("INTRA_OP_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_INTRA_OP_THREADS)
}

/// Get inter-op thread count from environment or use default
pub fn get_inter_op_threads() -> usize {
    std::env::var("INTER_OP_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_INTER_OP_THREADS)
}
