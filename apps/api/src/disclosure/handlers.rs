//! Axum route handlers for the Disclosure API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::disclosure::generator::generate_disclosure;
use crate::errors::AppError;
use crate::models::disclosure::{DisclosureRequest, GenerateDisclosureResponse, HistoryEntry};
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// POST /api/generate-disclosure
///
/// Drafts a disclosure from structured metrics. Schema violations are rejected
/// by the `Json` extractor before this runs.
pub async fn handle_generate_disclosure(
    State(state): State<AppState>,
    Json(request): Json<DisclosureRequest>,
) -> Result<Json<GenerateDisclosureResponse>, AppError> {
    let response = generate_disclosure(
        state.llm.as_deref(),
        &state.config.openai_model,
        &state.history,
        &request,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/history?limit=N
///
/// Most recent generations first. `limit` defaults to 10. A negative limit
/// `-n` returns everything except the `n` oldest entries.
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Json<Vec<HistoryEntry>> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let count = usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX);
    let entries = if limit >= 0 {
        state.history.recent(count)
    } else {
        state.history.all_but_oldest(count)
    };
    Json(entries)
}
