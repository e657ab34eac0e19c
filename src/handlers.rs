use crate::errors::AppError;
use crate::models::{ActionResponse, IntakeForm, IntakeRequest, TrackerView};
use crate::state::AppState;
use crate::storage::{load_data, persist_data};
use crate::tracker::{Tracker, FLOWER_ICON};
use crate::ui::render_index;
use crate::view::build_view;
use axum::{
    extract::{Form, State},
    response::{Html, Redirect},
    Json,
};
use chrono::Local;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let tracker = state.tracker.lock().await;
    Html(render_index(&build_view(&tracker, &Local::now())))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<TrackerView>, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(Json(build_view(&tracker, &Local::now())))
}

pub async fn intake(
    State(state): State<AppState>,
    Json(payload): Json<IntakeRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let view = apply_intake(&state, &payload.amount.into_text()).await?;
    Ok(Json(ActionResponse { message: None, view }))
}

pub async fn undo(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    let view = apply_undo(&state).await?;
    Ok(Json(ActionResponse { message: None, view }))
}

pub async fn flower(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    let view = apply_flower(&state).await?;
    Ok(Json(ActionResponse {
        message: Some(format!("The flower was watered and a new one has grown! {FLOWER_ICON}")),
        view,
    }))
}

pub async fn reload(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    *tracker = Tracker::load(load_data(&state.data_path).await);
    info!(records = tracker.records().len(), "reloaded tracker from disk");
    Ok(Json(ActionResponse {
        message: None,
        view: build_view(&tracker, &Local::now()),
    }))
}

pub async fn intake_form(
    State(state): State<AppState>,
    Form(form): Form<IntakeForm>,
) -> Result<Redirect, AppError> {
    apply_intake(&state, &form.amount).await?;
    Ok(Redirect::to("/"))
}

pub async fn undo_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_undo(&state).await?;
    Ok(Redirect::to("/"))
}

pub async fn flower_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_flower(&state).await?;
    Ok(Redirect::to("/"))
}

async fn apply_intake(state: &AppState, input: &str) -> Result<TrackerView, AppError> {
    let now = Local::now();
    let mut tracker = state.tracker.lock().await;
    let record = tracker.add_intake(input, &now)?;
    info!(amount = record.amount, bucket = tracker.bucket_level(), "recorded intake");

    persist_data(&state.data_path, &tracker.snapshot()).await?;
    Ok(build_view(&tracker, &now))
}

async fn apply_undo(state: &AppState) -> Result<TrackerView, AppError> {
    let mut tracker = state.tracker.lock().await;
    let record = tracker.undo_last()?;
    info!(amount = record.amount, bucket = tracker.bucket_level(), "undid last intake");

    persist_data(&state.data_path, &tracker.snapshot()).await?;
    Ok(build_view(&tracker, &Local::now()))
}

async fn apply_flower(state: &AppState) -> Result<TrackerView, AppError> {
    let now = Local::now();
    let mut tracker = state.tracker.lock().await;
    tracker.water_flower(&now)?;
    info!(flowers = tracker.garden().len(), bucket = tracker.bucket_level(), "grew a flower");

    persist_data(&state.data_path, &tracker.snapshot()).await?;
    Ok(build_view(&tracker, &now))
}
