use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ComputeGlRequest {
    pub gender: String,
    #[validate(range(exclusive_min = 0.0, message = "body_weight must be positive"))]
    pub body_weight: f64,
    #[validate(range(exclusive_min = 0.0, message = "lifted_weight must be positive"))]
    pub lifted_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComputeGlResponse {
    pub gl_points: f64,
    pub gl_coefficient: f64,
    pub body_weight: f64,
    pub lifted_weight: f64,
    pub gender: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RequiredLiftRequest {
    pub gender: String,
    #[validate(range(exclusive_min = 0.0, message = "body_weight must be positive"))]
    pub body_weight: f64,
    #[validate(range(exclusive_min = 0.0, message = "target_gl_points must be positive"))]
    pub target_gl_points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequiredLiftResponse {
    pub target_gl_points: f64,
    pub body_weight: f64,
    pub gender: String,
    pub required_lift: f64,
    pub message: String,
}
