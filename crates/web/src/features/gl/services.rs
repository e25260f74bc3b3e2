use storage::{
    dto::gl::{ComputeGlRequest, ComputeGlResponse, RequiredLiftRequest, RequiredLiftResponse},
    services::gl_points::{self, Gender},
};

use crate::error::{WebError, WebResult};

fn parse_gender(value: &str) -> WebResult<Gender> {
    value.parse::<Gender>().map_err(WebError::BadRequest)
}

/// Score a single lift or total
pub fn compute(req: &ComputeGlRequest) -> WebResult<ComputeGlResponse> {
    let gender = parse_gender(&req.gender)?;

    let points = gl_points::gl_points(req.body_weight, req.lifted_weight, gender);
    let coefficient = gl_points::gl_coefficient(gender, req.body_weight);

    Ok(ComputeGlResponse {
        gl_points: gl_points::round_dp(points, 6),
        gl_coefficient: gl_points::round_dp(coefficient, 6),
        body_weight: req.body_weight,
        lifted_weight: req.lifted_weight,
        gender: gender.as_str().to_string(),
    })
}

/// Weight needed to reach a GL target at a given body weight
pub fn required_lift(req: &RequiredLiftRequest) -> WebResult<RequiredLiftResponse> {
    let gender = parse_gender(&req.gender)?;

    let required = gl_points::round_dp(
        gl_points::required_lift(req.body_weight, req.target_gl_points, gender),
        2,
    );

    Ok(RequiredLiftResponse {
        target_gl_points: req.target_gl_points,
        body_weight: req.body_weight,
        gender: gender.as_str().to_string(),
        required_lift: required,
        message: format!(
            "To achieve {} GL points at {}kg bodyweight, you need to lift approximately {:.2}kg.",
            req.target_gl_points, req.body_weight, required
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_rounds_to_six_places() {
        let response = compute(&ComputeGlRequest {
            gender: "Male".to_string(),
            body_weight: 83.0,
            lifted_weight: 500.0,
        })
        .unwrap();

        assert_eq!(response.gl_points, 43.397104);
        assert_eq!(response.gl_coefficient, 0.086794);
        assert_eq!(response.gender, "male");
    }

    #[test]
    fn test_compute_rejects_unknown_gender() {
        let result = compute(&ComputeGlRequest {
            gender: "x".to_string(),
            body_weight: 83.0,
            lifted_weight: 500.0,
        });

        assert!(matches!(result, Err(WebError::BadRequest(_))));
    }

    #[test]
    fn test_required_lift_message() {
        let response = required_lift(&RequiredLiftRequest {
            gender: "male".to_string(),
            body_weight: 90.0,
            target_gl_points: 51.942602,
        })
        .unwrap();

        assert_eq!(response.required_lift, 600.0);
        assert!(response.message.ends_with("approximately 600.00kg."));
    }
}
