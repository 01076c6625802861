//! Unit 2 MW Predictor - Web Server
//!
//! Serves the bilingual prediction page and a small JSON API over the
//! same prediction service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  UNIT 2 WEB SERVER                   │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌──────────────┐  │
//! │  │  HTML page │   │  JSON API  │   │  /log.csv    │  │
//! │  │  (forms)   │   │  /api/v1   │   │  download    │  │
//! │  └─────┬──────┘   └─────┬──────┘   └──────┬───────┘  │
//! │        └────────────────┼─────────────────┘          │
//! │                         ▼                            │
//! │               ┌───────────────────┐                  │
//! │               │ PredictionService │                  │
//! │               └────┬─────────┬────┘                  │
//! │                    ▼         ▼                       │
//! │              ONNX model   CSV log                    │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod views;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unit2_core::{get_handle, PredictionLog, PredictionService};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Unit 2 MW Predictor starting ({})...", config.environment);
    tracing::info!("Model: {}", config.model_path);
    tracing::info!("Log file: {}", config.log_path);

    // The page is useless without a model, so a load failure is fatal
    let model_path = config.model_path.clone();
    let tuning = config.tuning.clone();
    let engine = tokio::task::spawn_blocking(move || get_handle(&model_path, &tuning))
        .await?
        .with_context(|| format!("Failed to load model {}", config.model_path))?;

    tracing::info!("Model ready (input '{}')", engine.input_name());

    // Build application state
    let state = AppState {
        service: PredictionService::new(engine, Arc::new(PredictionLog::new(config.log_path.clone()))),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &config::Config) {
    let default_filter = if config.is_production() {
        "unit2_web=info,unit2_core=info,tower_http=info"
    } else {
        "unit2_web=debug,unit2_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub service: PredictionService,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // HTML page
    let page_routes = Router::new()
        .route("/", get(handlers::page::index))
        .route("/predict", post(handlers::page::submit))
        .route("/log/clear", post(handlers::page::clear))
        .route("/log.csv", get(handlers::log::download))
        .route("/health", get(handlers::health::check));

    // JSON API
    let api_routes = Router::new()
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/log", get(handlers::log::list).delete(handlers::log::clear))
        .route("/api/v1/model", get(handlers::model::info));

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
