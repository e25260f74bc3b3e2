use axum::{Router, routing::get};

use super::handlers::{lift_leaderboard, live_scoreboard};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:event_id", get(live_scoreboard))
}

pub fn leaderboard_routes() -> Router<AppState> {
    Router::new().route("/:event_id/:lift_type", get(lift_leaderboard))
}
