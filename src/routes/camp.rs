//! Camper, activity, and signup routes. Only the operations below are exposed;
//! any other method on these paths gets axum's 405.

use crate::handlers::{activities, campers, signups};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn camp_routes(state: AppState) -> Router {
    Router::new()
        .route("/campers", get(campers::list).post(campers::create))
        .route("/campers/:id", get(campers::read).patch(campers::update))
        .route("/activities", get(activities::list))
        .route("/activities/:id", delete(activities::delete))
        .route("/signups", post(signups::create))
        .with_state(state)
}
