use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/intake", post(handlers::intake_form))
        .route("/undo", post(handlers::undo_form))
        .route("/flower", post(handlers::flower_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/intake", post(handlers::intake))
        .route("/api/undo", post(handlers::undo))
        .route("/api/flower", post(handlers::flower))
        .route("/api/reload", post(handlers::reload))
        .with_state(state)
}
