//! Access-history API endpoints.

use axum::{extract::State, Json};

use super::Ack;
use crate::errors::AppError;
use crate::models::{RecordVisitRequest, Visit};
use crate::AppState;

/// POST /api/access-history - Record a visit.
pub async fn record_visit(
    State(state): State<AppState>,
    Json(request): Json<RecordVisitRequest>,
) -> Result<Json<Visit>, AppError> {
    let visit = state.repo.record_visit(request).await?;
    Ok(Json(visit))
}

/// GET /api/access-history - List recorded visits.
pub async fn list_visits(State(state): State<AppState>) -> Json<Vec<Visit>> {
    Json(state.repo.list_visits().await)
}

/// DELETE /api/access-history - Clear the access history.
pub async fn clear_visits(State(state): State<AppState>) -> Result<Json<Ack>, AppError> {
    state.repo.clear_visits().await?;
    Ok(Json(Ack::ok()))
}
