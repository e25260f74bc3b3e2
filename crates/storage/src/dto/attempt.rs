use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Athlete, Attempt, AttemptStatus};

/// Request payload for seeding an athlete's attempts in an event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InitLiftsRequest {
    pub user_id: Uuid,
    pub event_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InitLiftsResponse {
    pub message: String,
    pub attempts: Vec<Attempt>,
}

/// Request payload for changing the declared weight of the current attempt
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitWeightRequest {
    #[validate(range(
        min = 0.0,
        max = 1000.0,
        message = "Weight must be between 0 and 1000 kg"
    ))]
    pub next_weight: f64,
}

impl SubmitWeightRequest {
    /// Weight in kg, kept to two decimals like the database column
    pub fn next_weight(&self) -> Decimal {
        Decimal::from_f64_retain(self.next_weight)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitWeightResponse {
    pub message: String,
    pub attempt: Attempt,
}

/// Request payload for an official's decision
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: AttemptStatus,
}

impl UpdateStatusRequest {
    pub fn validate_status(&self) -> Result<(), &'static str> {
        if self.status.is_resolved() {
            Ok(())
        } else {
            Err("Status must be one of good, fail or no_attempt")
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub attempt: Attempt,
    pub next_attempt: Option<Attempt>,
}

/// Athlete identity shown next to a current attempt
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteSummary {
    pub athlete_id: Uuid,
    pub full_name: String,
    pub gender: Option<String>,
    pub weight: Option<Decimal>,
}

impl From<Athlete> for AthleteSummary {
    fn from(athlete: Athlete) -> Self {
        Self {
            athlete_id: athlete.athlete_id,
            full_name: athlete.full_name,
            gender: athlete.gender,
            weight: athlete.weight,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentLifter {
    pub attempt: Attempt,
    pub athlete: AthleteSummary,
}
