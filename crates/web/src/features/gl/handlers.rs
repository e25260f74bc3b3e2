use axum::response::{IntoResponse, Response};
use storage::dto::gl::{ComputeGlRequest, ComputeGlResponse, RequiredLiftRequest, RequiredLiftResponse};
use validator::Validate;

use crate::error::WebError;
use crate::extract::Json;

use super::services;

#[utoipa::path(
    post,
    path = "/api/gl/compute",
    request_body = ComputeGlRequest,
    responses(
        (status = 200, description = "GL points and coefficient", body = ComputeGlResponse),
        (status = 400, description = "Invalid gender or weights")
    ),
    tag = "gl"
)]
pub async fn compute_gl(Json(req): Json<ComputeGlRequest>) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::compute(&req)?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/gl/required-lift",
    request_body = RequiredLiftRequest,
    responses(
        (status = 200, description = "Lift needed to reach the target", body = RequiredLiftResponse),
        (status = 400, description = "Invalid gender or weights")
    ),
    tag = "gl"
)]
pub async fn required_lift(Json(req): Json<RequiredLiftRequest>) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::required_lift(&req)?;

    Ok(Json(response).into_response())
}
