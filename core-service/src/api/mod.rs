//! API Module
//!
//! Front-end facing operations (HTTP server, future CLI).

pub mod service;

pub use service::{PredictionService, Submission};
