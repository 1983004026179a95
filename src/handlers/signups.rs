//! Signup handlers.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::NewSignup;
use crate::response::{created, SignupDetail};
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewSignup>,
) -> Result<impl IntoResponse, AppError> {
    let (signup, camper, activity) = state.repo.insert_signup(&body).await?;
    tracing::info!(id = signup.id, camper_id = signup.camper_id, activity_id = signup.activity_id, "signup created");
    Ok(created(SignupDetail::new(signup, camper, activity)))
}
