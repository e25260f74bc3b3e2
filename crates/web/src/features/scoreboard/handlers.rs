use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    dto::scoreboard::{LiftLeaderboardEntry, ScoreboardRow},
    models::LiftType,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::extract::{Json, Path};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/live-scoreboard/{event_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "One row per registered athlete, in registration order", body = Vec<ScoreboardRow>)
    ),
    tag = "scoreboard"
)]
pub async fn live_scoreboard(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let rows = services::live_scoreboard(state.store(), event_id).await?;

    Ok(Json(rows).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leaderboards/{event_id}/{lift_type}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("lift_type" = LiftType, Path, description = "squat, bench or deadlift")
    ),
    responses(
        (status = 200, description = "Ranked athletes for one lift", body = Vec<LiftLeaderboardEntry>),
        (status = 400, description = "Unknown lift type")
    ),
    tag = "scoreboard"
)]
pub async fn lift_leaderboard(
    State(state): State<AppState>,
    Path((event_id, lift_type)): Path<(Uuid, LiftType)>,
) -> Result<Response, WebError> {
    let entries = services::lift_leaderboard(state.store(), event_id, lift_type).await?;

    Ok(Json(entries).into_response())
}
