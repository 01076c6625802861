//! Model info handler

use axum::{extract::{Query, State}, Json};
use serde::Serialize;

use unit2_core::{EngineStatus, ModelCard, SessionTuning};

use crate::models::PageQuery;
use crate::AppState;

#[derive(Serialize)]
pub struct ModelInfoResponse {
    pub engine: EngineStatus,
    pub tuning: SessionTuning,
    pub card: ModelCard,
}

/// Engine status, session tuning and the model card
pub async fn info(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<ModelInfoResponse> {
    let lang = query.language(state.config.default_language);

    Json(ModelInfoResponse {
        engine: state.service.engine_status(),
        tuning: state.config.tuning.clone(),
        card: ModelCard::for_language(lang),
    })
}
