//! HTML page handlers

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};

use unit2_core::{ClearOutcome, InputVector, PredictionService};

use super::blocking;
use crate::models::{PageQuery, Readings};
use crate::views::{LogView, NoticeKind, PageView};
use crate::{AppResult, AppState};

fn view_for(state: &AppState, query: &PageQuery) -> PageView {
    PageView::new(query.language(state.config.default_language), query.show_log())
}

/// Fill the log viewer when the toggle is on
async fn load_log(service: &PredictionService, view: &mut PageView) -> AppResult<()> {
    if !view.show_log {
        return Ok(());
    }

    let service = service.clone();
    view.log = match blocking(move || service.read_log()).await? {
        Ok(Some(records)) => LogView::Records(records),
        Ok(None) => LogView::Absent,
        Err(e) => {
            tracing::warn!("Log not shown: {}", e);
            LogView::Unreadable(e.to_string())
        }
    };
    Ok(())
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let mut view = view_for(&state, &query);
    load_log(&state.service, &mut view).await?;
    Ok(Html(view.render()))
}

/// POST /predict
pub async fn submit(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<Html<String>> {
    let mut view = view_for(&state, &query);

    let checked = Readings::from_form(&form).and_then(|readings| {
        view.inputs = InputVector::from(readings);
        readings.validated()
    });

    match checked {
        Ok(input) => {
            let service = state.service.clone();
            match blocking(move || service.submit(input)).await? {
                Ok(submission) => {
                    tracing::info!(
                        predicted_mw = submission.result.predicted_mw,
                        logged = submission.logged(),
                        "Prediction served"
                    );
                    if let Some(warning) = submission.log_warning {
                        view.notice(NoticeKind::Warning, warning);
                    }
                    view.result = Some(submission.result);
                }
                Err(e) => {
                    tracing::error!("Prediction failed: {}", e);
                    view.notice(NoticeKind::Error, e.to_string());
                }
            }
        }
        Err(e) => view.notice(NoticeKind::Error, e.to_string()),
    }

    load_log(&state.service, &mut view).await?;
    Ok(Html(view.render()))
}

/// POST /log/clear
pub async fn clear(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let mut view = view_for(&state, &query);

    let service = state.service.clone();
    match blocking(move || service.clear_log()).await? {
        Ok(outcome @ ClearOutcome::Cleared) => {
            tracing::info!("Prediction log cleared");
            view.notice(NoticeKind::Success, outcome.message());
        }
        Ok(outcome @ ClearOutcome::NothingToClear) => view.notice(NoticeKind::Info, outcome.message()),
        Err(e) => view.notice(NoticeKind::Warning, e.to_string()),
    }

    load_log(&state.service, &mut view).await?;
    Ok(Html(view.render()))
}
