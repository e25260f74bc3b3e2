use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::attempt::{
    CurrentLifter, InitLiftsRequest, InitLiftsResponse, SubmitWeightRequest,
    SubmitWeightResponse, UpdateStatusRequest, UpdateStatusResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{Json, Path};
use crate::middleware::auth::Caller;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/attempts/init-lifts",
    request_body = InitLiftsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Lift attempts initialized successfully", body = InitLiftsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not an official"),
        (status = 404, description = "Athlete, event or player submission not found"),
        (status = 409, description = "Lift attempts already initialized")
    ),
    tag = "attempts"
)]
pub async fn init_lifts(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(req): Json<InitLiftsRequest>,
) -> Result<Response, WebError> {
    caller.require_official()?;

    let attempts = services::init_lifts(state.store(), req.user_id, req.event_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(InitLiftsResponse {
            message: "Lift attempts initialized successfully".to_string(),
            attempts,
        }),
    )
        .into_response())
}

#[utoipa::path(
    patch,
    path = "/api/attempts/{attempt_id}/submit-weight",
    params(
        ("attempt_id" = Uuid, Path, description = "Attempt ID")
    ),
    request_body = SubmitWeightRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Next weight submitted", body = SubmitWeightResponse),
        (status = 400, description = "Attempt not editable or update limit reached"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Attempt belongs to another athlete"),
        (status = 404, description = "Attempt not found")
    ),
    tag = "attempts"
)]
pub async fn submit_weight(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(attempt_id): Path<Uuid>,
    Json(req): Json<SubmitWeightRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let attempt =
        services::submit_weight(state.store(), caller, attempt_id, req.next_weight()).await?;

    Ok(Json(SubmitWeightResponse {
        message: "Next weight submitted".to_string(),
        attempt,
    })
    .into_response())
}

#[utoipa::path(
    patch,
    path = "/api/attempts/{attempt_id}/update-status",
    params(
        ("attempt_id" = Uuid, Path, description = "Attempt ID")
    ),
    request_body = UpdateStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Attempt status updated", body = UpdateStatusResponse),
        (status = 400, description = "Status is not a decision"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not an official"),
        (status = 404, description = "Attempt not found")
    ),
    tag = "attempts"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(attempt_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Response, WebError> {
    caller.require_official()?;
    req.validate_status()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let resolution = services::update_status(state.store(), attempt_id, req.status).await?;

    Ok(Json(UpdateStatusResponse {
        message: "Attempt status updated".to_string(),
        attempt: resolution.resolved,
        next_attempt: resolution.next,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/current-lifters",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Current attempts with athlete identity", body = Vec<CurrentLifter>)
    ),
    tag = "attempts"
)]
pub async fn current_lifters(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let lifters = services::current_lifters(state.store(), event_id).await?;

    Ok(Json(lifters).into_response())
}
