//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the Unit 2 regression model once per path and runs single-row
//! inference on it. The predictor only sees the `InferenceEngine` trait, so
//! the ONNX session can be swapped for another engine (or a stub in tests).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ndarray::Array2;
use once_cell::sync::Lazy;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{InferenceError, ModelLoadError};
use crate::logic::inputs::FEATURE_COUNT;

// ============================================================================
// STATE
// ============================================================================

/// Loaded handles, keyed by model path. Never invalidated.
static HANDLES: Lazy<HandleCache<ModelHandle>> = Lazy::new(HandleCache::new);

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Session option profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineProfile {
    /// Thread hints and memory pattern optimisation
    #[default]
    Tuned,
    /// Full graph optimisation, runtime defaults otherwise
    Plain,
}

impl EngineProfile {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tuned" => Some(EngineProfile::Tuned),
            "plain" => Some(EngineProfile::Plain),
            _ => None,
        }
    }
}

/// Session tuning hints applied when a model is first loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTuning {
    pub profile: EngineProfile,
    pub intra_op_threads: usize,
    pub inter_op_threads: usize,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            profile: EngineProfile::Tuned,
            intra_op_threads: constants::DEFAULT_INTRA_OP_THREADS,
            inter_op_threads: constants::DEFAULT_INTER_OP_THREADS,
        }
    }
}

/// Engine Status for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub input_name: Option<String>,
    pub inference_device: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
    pub loaded_at: Option<DateTime<Utc>>,
}

// ============================================================================
// INFERENCE ENGINE TRAIT
// ============================================================================

/// A regression engine taking the six ordered plant readings
pub trait InferenceEngine: Send + Sync {
    /// Raw (unclipped) model output for one input row
    fn infer(&self, features: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError>;

    fn status(&self) -> EngineStatus;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// Loaded ONNX session plus its declared input slot
pub struct ModelHandle {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    path: PathBuf,
    loaded_at: DateTime<Utc>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("path", &self.path)
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .finish_non_exhaustive()
    }
}

impl ModelHandle {
    /// Build a session from a model file. Prefer `get_handle`, which memoizes.
    pub fn load(path: &Path, tuning: &SessionTuning) -> Result<Self, ModelLoadError> {
        log::info!("Loading ONNX model from: {} ({:?} profile)", path.display(), tuning.profile);

        if !path.is_file() {
            return Err(ModelLoadError::NotFound(path.to_path_buf()));
        }

        let session_err = |e: ort::Error| ModelLoadError::Session {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut builder = Session::builder()
            .map_err(session_err)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(session_err)?;

        if tuning.profile == EngineProfile::Tuned {
            builder = builder
                .with_intra_threads(tuning.intra_op_threads)
                .map_err(session_err)?
                .with_inter_threads(tuning.inter_op_threads)
                .map_err(session_err)?
                .with_memory_pattern(true)
                .map_err(session_err)?;
        }

        let session = builder.commit_from_file(path).map_err(session_err)?;

        let input_name = session.inputs.first()
            .map(|i| i.name.clone())
            .ok_or_else(|| ModelLoadError::MissingSlot { path: path.to_path_buf(), slot: "input" })?;
        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelLoadError::MissingSlot { path: path.to_path_buf(), slot: "output" })?;

        log::info!("ONNX model loaded (input slot `{}`, output slot `{}`)", input_name, output_name);

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            path: path.to_path_buf(),
            loaded_at: Utc::now(),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        })
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    fn run(&self, features: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| InferenceError::new(format!("Array error: {}", e)))?;

        let input_tensor = Tensor::from_array(input_array)
            .map_err(|e| InferenceError::new(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| InferenceError::new(format!("Inference failed: {}", e)))?;

        let output = outputs.get(self.output_name.as_str())
            .ok_or_else(|| InferenceError::new(format!("No output `{}`", self.output_name)))?;

        let (_, data) = output.try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::new(format!("Extract error: {}", e)))?;

        let raw = data.first().copied();
        raw.ok_or_else(|| InferenceError::new("Empty output tensor"))
    }
}

impl InferenceEngine for ModelHandle {
    fn infer(&self, features: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError> {
        let start_time = std::time::Instant::now();
        let raw = self.run(features)?;
        let elapsed = start_time.elapsed().as_micros() as u64;

        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
        log::debug!("ONNX inference: raw={} in {}us", raw, elapsed);

        Ok(raw)
    }

    fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: true,
            model_name: self.path.display().to_string(),
            input_name: Some(self.input_name.clone()),
            inference_device: "ONNX Runtime (CPU)".to_string(),
            avg_latency_ms: avg,
            inference_count: count,
            loaded_at: Some(self.loaded_at),
        }
    }
}

// ============================================================================
// HANDLE PROVIDER
// ============================================================================

/// Path-keyed cache of shared handles. A failed load leaves no entry, so the
/// next call tries again.
pub struct HandleCache<T> {
    entries: RwLock<HashMap<PathBuf, Arc<T>>>,
}

impl<T> HandleCache<T> {
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }

    /// Return the cached handle for `path`, or run `load` once to create it
    pub fn get_or_load<E, F>(&self, path: &Path, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce(&Path) -> Result<T, E>,
    {
        if let Some(handle) = self.entries.read().get(path) {
            return Ok(Arc::clone(handle));
        }

        let mut entries = self.entries.write();
        if let Some(handle) = entries.get(path) {
            return Ok(Arc::clone(handle));
        }

        let handle = Arc::new(load(path)?);
        entries.insert(path.to_path_buf(), Arc::clone(&handle));
        Ok(handle)
    }

    #[cfg(test)]
    fn contains(&self, path: &Path) -> bool {
        self.entries.read().contains_key(path)
    }
}

impl<T> Default for HandleCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the handle for `path`, loading it on first use.
///
/// Later calls with the same path return the same handle; `tuning` only
/// applies to the first load.
pub fn get_handle(path: impl AsRef<Path>, tuning: &SessionTuning) -> Result<Arc<ModelHandle>, ModelLoadError> {
    HANDLES.get_or_load(path.as_ref(), |path| ModelHandle::load(path, tuning))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_model_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.onnx");

        let err = get_handle(&path, &SessionTuning::default()).unwrap_err();
        assert!(matches!(err, ModelLoadError::NotFound(ref p) if p == &path));
        assert!(!HANDLES.contains(&path));
    }

    #[test]
    fn test_malformed_model_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.onnx");
        std::fs::write(&path, b"definitely not a protobuf").unwrap();

        let err = get_handle(&path, &SessionTuning::default()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Session { .. }));
        assert!(!HANDLES.contains(&path));
    }

    #[test]
    fn test_engine_profile_parse() {
        assert_eq!(EngineProfile::parse("Tuned"), Some(EngineProfile::Tuned));
        assert_eq!(EngineProfile::parse(" plain "), Some(EngineProfile::Plain));
        assert_eq!(EngineProfile::parse("fast"), None);
    }

    #[test]
    fn test_default_tuning_hints() {
        let tuning = SessionTuning::default();
        assert_eq!(tuning.profile, EngineProfile::Tuned);
        assert_eq!(tuning.intra_op_threads, 2);
        assert_eq!(tuning.inter_op_threads, 1);
    }

    #[test]
    fn test_cache_loads_each_path_once() {
        let cache: HandleCache<String> = HandleCache::new();
        let loads = AtomicU64::new(0);
        let load = |path: &Path| -> Result<String, ModelLoadError> {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(path.display().to_string())
        };

        let first = cache.get_or_load(Path::new("unit2.onnx"), load).unwrap();
        let second = cache.get_or_load(Path::new("unit2.onnx"), load).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        let other = cache.get_or_load(Path::new("other.onnx"), load).unwrap();
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cache_does_not_keep_failed_loads() {
        let cache: HandleCache<u32> = HandleCache::new();
        let path = Path::new("flaky.onnx");

        let failed = cache.get_or_load(path, |p| Err(ModelLoadError::NotFound(p.to_path_buf())));
        assert!(failed.is_err());
        assert!(!cache.contains(path));

        let loaded = cache.get_or_load(path, |_| Ok::<_, ModelLoadError>(7)).unwrap();
        assert_eq!(*loaded, 7);
        assert!(cache.contains(path));
    }
}
