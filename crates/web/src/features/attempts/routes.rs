use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use super::handlers::{current_lifters, init_lifts, submit_weight, update_status};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/init-lifts", post(init_lifts))
        .route("/:attempt_id/submit-weight", patch(submit_weight))
        .route("/:attempt_id/update-status", patch(update_status))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}

pub fn event_routes() -> Router<AppState> {
    Router::new().route("/:event_id/current-lifters", get(current_lifters))
}
