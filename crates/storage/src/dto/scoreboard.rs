use serde::{Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::LiftType;

/// Marker shown for an attempt that did not count.
pub const MISS_MARKER: &str = "✗";

/// One cell of an athlete's attempt sequence.
///
/// Serializes as the lifted weight for a good lift, or as [`MISS_MARKER`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptMark {
    Good(f64),
    Miss,
}

impl Serialize for AttemptMark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Good(weight) => serializer.serialize_f64(*weight),
            Self::Miss => serializer.serialize_str(MISS_MARKER),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreboardRow {
    pub athlete_id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub team: String,
    pub birth_year: String,
    pub division: String,
    pub gender: String,
    pub body_weight: f64,
    pub weight_class: i32,
    #[schema(value_type = Vec<Object>)]
    pub squat: Vec<AttemptMark>,
    pub best_squat: f64,
    #[schema(value_type = Vec<Object>)]
    pub bench: Vec<AttemptMark>,
    pub best_bench: f64,
    #[schema(value_type = Vec<Object>)]
    pub deadlift: Vec<AttemptMark>,
    pub best_deadlift: f64,
    pub total: f64,
    /// False when at least one lift has no good attempt
    pub has_total: bool,
    pub gl_points: f64,
    pub gl_coefficient: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LiftLeaderboardEntry {
    pub rank: i64,
    pub athlete_id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub team: String,
    pub birth_year: String,
    pub division: String,
    pub body_weight: f64,
    pub weight_class: i32,
    pub lift_type: LiftType,
    #[schema(value_type = Vec<Object>)]
    pub attempts: Vec<AttemptMark>,
    pub best: f64,
}
