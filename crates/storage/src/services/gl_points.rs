//! IPF GoodLift (GL) points.
//!
//! GL = Total × 100 / (A - B · e^(-C · BW))
//!
//! Values are computed in full `f64` precision; callers round with
//! [`round_dp`] when presenting them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Lenient parse for registration form answers: anything other than
    /// "female" (case-insensitive) scores with the men's constants.
    pub fn from_form_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("female") {
            Self::Female
        } else {
            Self::Male
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err("Invalid gender. Must be male or female.".to_string()),
        }
    }
}

/// GL formula constants for a specific gender
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlConstants {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

pub const MEN: GlConstants = GlConstants {
    a: 1199.72839,
    b: 102.18609,
    c: 0.00921,
};

pub const WOMEN: GlConstants = GlConstants {
    a: 1249.07955,
    b: 110.0103,
    c: 0.008731,
};

impl Gender {
    pub fn constants(&self) -> GlConstants {
        match self {
            Self::Male => MEN,
            Self::Female => WOMEN,
        }
    }
}

fn denominator(gender: Gender, body_weight: f64) -> f64 {
    let GlConstants { a, b, c } = gender.constants();
    a - b * (-c * body_weight).exp()
}

/// GL points for `lifted` kg at `body_weight` kg. Zero when the formula's
/// denominator is not positive.
pub fn gl_points(body_weight: f64, lifted: f64, gender: Gender) -> f64 {
    let denominator = denominator(gender, body_weight);
    if denominator <= 0.0 {
        0.0
    } else {
        (lifted * 100.0) / denominator
    }
}

/// Points per kg lifted; depends only on body weight and gender.
pub fn gl_coefficient(gender: Gender, body_weight: f64) -> f64 {
    let denominator = denominator(gender, body_weight);
    if denominator <= 0.0 {
        0.0
    } else {
        100.0 / denominator
    }
}

/// Total needed at `body_weight` to score `target_points`.
pub fn required_lift(body_weight: f64, target_points: f64, gender: Gender) -> f64 {
    let denominator = denominator(gender, body_weight);
    if denominator <= 0.0 {
        0.0
    } else {
        (target_points * denominator) / 100.0
    }
}

pub fn round_dp(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_known_male_score() {
        let expected_denominator = 1199.72839 - 102.18609 * (-0.00921f64 * 83.0).exp();
        let points = gl_points(83.0, 500.0, Gender::Male);

        assert!((points - 500.0 * 100.0 / expected_denominator).abs() < EPSILON);
        assert!((round_dp(points, 6) - 43.397104).abs() < EPSILON);
        assert!((round_dp(gl_coefficient(Gender::Male, 83.0), 6) - 0.086794).abs() < EPSILON);
    }

    #[test]
    fn test_known_female_score() {
        let points = gl_points(63.0, 300.0, Gender::Female);
        assert!((round_dp(points, 6) - 25.303377).abs() < EPSILON);
    }

    #[test]
    fn test_points_scale_linearly_with_total() {
        for gender in [Gender::Male, Gender::Female] {
            for bw in [52.0, 74.5, 105.0, 140.0] {
                let single = gl_points(bw, 250.0, gender);
                let double = gl_points(bw, 500.0, gender);
                assert!((double - 2.0 * single).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_coefficient_matches_points_per_kg() {
        let coefficient = gl_coefficient(Gender::Female, 72.0);
        for lifted in [100.0, 337.5, 610.0] {
            let points = gl_points(72.0, lifted, Gender::Female);
            assert!((points - coefficient * lifted).abs() < EPSILON);
        }
    }

    #[test]
    fn test_non_positive_denominator_scores_zero() {
        assert_eq!(gl_points(-300.0, 500.0, Gender::Male), 0.0);
        assert_eq!(gl_coefficient(Gender::Male, -300.0), 0.0);
        assert_eq!(required_lift(-300.0, 80.0, Gender::Male), 0.0);
    }

    #[test]
    fn test_required_lift_inverts_points() {
        let lifted = required_lift(90.0, 51.942602, Gender::Male);
        assert!((round_dp(lifted, 2) - 600.0).abs() < EPSILON);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!(Gender::from_form_value("FEMALE"), Gender::Female);
        assert_eq!(Gender::from_form_value(" female "), Gender::Female);
        assert_eq!(Gender::from_form_value("femal"), Gender::Male);
        assert_eq!(Gender::from_form_value(""), Gender::Male);

        assert_eq!("Male".parse::<Gender>(), Ok(Gender::Male));
        assert!("other".parse::<Gender>().is_err());
    }
}
