//! Revision API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::Ack;
use crate::errors::AppError;
use crate::models::{CreateRevisionRequest, Revision, UpdateRevisionRequest};
use crate::AppState;

/// GET /api/revisions - List all revisions.
pub async fn list_revisions(State(state): State<AppState>) -> Json<Vec<Revision>> {
    Json(state.repo.list_revisions().await)
}

/// POST /api/revisions - Create a new revision.
pub async fn create_revision(
    State(state): State<AppState>,
    Json(request): Json<CreateRevisionRequest>,
) -> Result<Json<Revision>, AppError> {
    let revision = state.repo.create_revision(request).await?;
    Ok(Json(revision))
}

/// PUT /api/revisions/:id - Set a revision's completion flag.
pub async fn update_revision(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRevisionRequest>,
) -> Result<Json<Revision>, AppError> {
    let Some(id) = parse_id(&id) else {
        return Err(AppError::NotFound("Revision not found".to_string()));
    };

    let revision = state.repo.update_revision(id, request).await?;
    Ok(Json(revision))
}

/// DELETE /api/revisions/:id - Delete a revision.
pub async fn delete_revision(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    // An id that is not a number matches nothing, but the document is still
    // written back.
    state.repo.delete_revision(parse_id(&id)).await?;
    Ok(Json(Ack::ok()))
}

/// Read the leading integer of a path segment, so `12`, ` 12` and `12abc` all
/// name revision 12.
fn parse_id(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    raw[..sign_len + digits].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(" 7"), Some(7));
        assert_eq!(parse_id("12abc"), Some(12));
        assert_eq!(parse_id("-3"), Some(-3));
        assert_eq!(parse_id("+4"), Some(4));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-"), None);
        assert_eq!(parse_id(""), None);
    }
}
