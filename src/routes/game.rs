use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{common::CommandAck, detection::DetectionReport, game::GameStateResponse},
    error::AppError,
    services::{detection_service, game_service},
    state::SharedState,
};

/// Routes exposing the game state, round commands, and classifier ingest.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/play", post(play))
        .route("/api/reset", post(reset))
        .route("/api/detections", post(push_detections))
}

/// Return a consistent point-in-time snapshot of the whole game state.
#[utoipa::path(
    get,
    path = "/api/state",
    tag = "game",
    responses(
        (status = 200, description = "Current game state", body = GameStateResponse)
    )
)]
pub async fn get_state(State(state): State<SharedState>) -> Json<GameStateResponse> {
    Json(game_service::current_state(&state).await)
}

/// Start a round; rejected with 409 while one is already running.
#[utoipa::path(
    post,
    path = "/api/play",
    tag = "game",
    responses(
        (status = 200, description = "Round started", body = CommandAck),
        (status = 409, description = "A round is already in progress")
    )
)]
pub async fn play(State(state): State<SharedState>) -> Result<Json<CommandAck>, AppError> {
    let ack = game_service::start_round(&state).await?;
    Ok(Json(ack))
}

/// Reset scores, history, and phase back to a fresh idle state.
#[utoipa::path(
    post,
    path = "/api/reset",
    tag = "game",
    responses(
        (status = 200, description = "State reset", body = CommandAck)
    )
)]
pub async fn reset(State(state): State<SharedState>) -> Json<CommandAck> {
    Json(game_service::reset(&state).await)
}

/// Ingest a raw classifier report; malformed entries are ignored.
#[utoipa::path(
    post,
    path = "/api/detections",
    tag = "detections",
    request_body = DetectionReport,
    responses(
        (status = 200, description = "Report processed", body = CommandAck)
    )
)]
pub async fn push_detections(
    State(state): State<SharedState>,
    Json(report): Json<DetectionReport>,
) -> Json<CommandAck> {
    detection_service::ingest(&state, &report).await;
    Json(CommandAck::ok_bare())
}
