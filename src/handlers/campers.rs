//! Camper handlers: list, create, read (with signups), patch.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{Camper, NewCamper};
use crate::response::{accepted, created, ok, CamperDetail, CamperSummary};
use crate::service::{CampRepository, RequestValidator};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde_json::Value;

const ENTITY: &str = "Camper";

async fn detail(repo: &dyn CampRepository, camper: Camper) -> Result<CamperDetail, AppError> {
    let signups = repo.signups_for_camper(camper.id).await?;
    Ok(CamperDetail::new(camper, signups))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let campers = state.repo.list_campers().await?;
    let body: Vec<CamperSummary> = campers.into_iter().map(Into::into).collect();
    Ok(ok(body))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewCamper>,
) -> Result<impl IntoResponse, AppError> {
    let camper = state.repo.insert_camper(&body).await?;
    tracing::info!(id = camper.id, "camper created");
    Ok(created(detail(state.repo.as_ref(), camper).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    let camper = state
        .repo
        .find_camper(id)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;
    Ok(ok(detail(state.repo.as_ref(), camper).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<JsonBody<Value>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    let mut camper = state
        .repo
        .find_camper(id)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;
    // A missing camper is reported before anything is wrong with the body.
    let JsonBody(body) = body?;
    let patch = RequestValidator::camper_patch(body)?;
    camper.apply(patch)?;
    let camper = state
        .repo
        .update_camper(&camper)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;
    tracing::info!(id = camper.id, "camper updated");
    Ok(accepted(detail(state.repo.as_ref(), camper).await?))
}
