use axum::{Router, routing::post};

use super::handlers::{compute_gl, required_lift};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/compute", post(compute_gl))
        .route("/required-lift", post(required_lift))
}
