use axum::Router;

use crate::features::{attempts, gl, scoreboard};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

pub fn router(state: AppState, api_keys: ApiKeys) -> Router {
    let api = Router::new()
        .nest("/attempts", attempts::routes::routes(api_keys))
        .nest("/events", attempts::routes::event_routes())
        .nest("/live-scoreboard", scoreboard::routes::routes())
        .nest("/leaderboards", scoreboard::routes::leaderboard_routes())
        .nest("/gl", gl::routes::routes());

    Router::new().nest("/api", api).with_state(state)
}
