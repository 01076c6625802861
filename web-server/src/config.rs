//! Configuration module

use std::env;

use unit2_core::constants;
use unit2_core::{EngineProfile, Language, SessionTuning};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// ONNX model file
    pub model_path: String,

    /// Prediction log CSV file
    pub log_path: String,

    /// Session tuning applied when the model is loaded
    pub tuning: SessionTuning,

    /// Language used when a request does not pick one
    pub default_language: Language,

    /// Emit JSON log lines instead of plain text
    pub json_logs: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),

            model_path: constants::get_model_path(),

            log_path: constants::get_log_path(),

            tuning: SessionTuning {
                profile: env::var("ENGINE_PROFILE")
                    .ok()
                    .and_then(|p| EngineProfile::parse(&p))
                    .unwrap_or_default(),
                intra_op_threads: constants::get_intra_op_threads(),
                inter_op_threads: constants::get_inter_op_threads(),
            },

            default_language: env::var("DEFAULT_LANGUAGE")
                .ok()
                .and_then(|l| Language::from_code(&l))
                .unwrap_or_default(),

            json_logs: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
impl Config {
    /// Defaults without touching the process environment
    pub fn for_tests(log_path: &std::path::Path) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            model_path: constants::DEFAULT_MODEL_PATH.to_string(),
            log_path: log_path.display().to_string(),
            tuning: SessionTuning::default(),
            default_language: Language::English,
            json_logs: false,
            environment: "test".to_string(),
        }
    }
}
