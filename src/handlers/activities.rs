//! Activity handlers: list and delete.

use super::parse_id;
use crate::error::AppError;
use crate::response::{ok, ActivitySummary};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

const ENTITY: &str = "Activity";

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let activities = state.repo.list_activities().await?;
    let body: Vec<ActivitySummary> = activities.into_iter().map(Into::into).collect();
    Ok(ok(body))
}

/// Signups for the activity go with it (cascade).
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    if !state.repo.delete_activity(id).await? {
        return Err(AppError::NotFound(ENTITY));
    }
    tracing::info!(id, "activity deleted");
    Ok(StatusCode::NO_CONTENT)
}
