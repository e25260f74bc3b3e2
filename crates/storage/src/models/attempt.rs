use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Number of attempts each athlete gets per lift type.
pub const ATTEMPTS_PER_LIFT: i16 = 3;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "lift_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LiftType {
    Squat,
    Bench,
    Deadlift,
}

impl LiftType {
    /// Competition order.
    pub const ALL: [LiftType; 3] = [LiftType::Squat, LiftType::Bench, LiftType::Deadlift];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::Bench => "bench",
            Self::Deadlift => "deadlift",
        }
    }
}

impl std::fmt::Display for LiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "attempt_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    #[default]
    Pending,
    Good,
    Fail,
    NoAttempt,
}

impl AttemptStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One try at a declared weight for a lift type and attempt number.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attempt {
    pub attempt_id: Uuid,
    pub athlete_id: Uuid,
    pub event_id: Uuid,
    pub lift_type: LiftType,
    pub attempt_number: i16,
    pub declared_weight: Decimal,
    /// Frozen copy of `declared_weight`, set when the attempt is resolved
    pub actual_weight: Option<Decimal>,
    pub status: AttemptStatus,
    pub is_current: bool,
    pub update_count: i16,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Attempt {
    pub fn is_good(&self) -> bool {
        self.status == AttemptStatus::Good
    }

    /// How many weight changes this attempt allows. The opener allows none.
    pub fn max_updates(&self) -> i16 {
        match self.attempt_number {
            2 => 1,
            3 => 2,
            _ => 0,
        }
    }
}

/// Attempt row prior to insertion.
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub attempt_id: Uuid,
    pub athlete_id: Uuid,
    pub event_id: Uuid,
    pub lift_type: LiftType,
    pub attempt_number: i16,
    pub declared_weight: Decimal,
    pub is_current: bool,
}

impl NewAttempt {
    pub fn into_attempt(self, created_at: NaiveDateTime) -> Attempt {
        Attempt {
            attempt_id: self.attempt_id,
            athlete_id: self.athlete_id,
            event_id: self.event_id,
            lift_type: self.lift_type,
            attempt_number: self.attempt_number,
            declared_weight: self.declared_weight,
            actual_weight: None,
            status: AttemptStatus::Pending,
            is_current: self.is_current,
            update_count: 0,
            completed_at: None,
            created_at,
        }
    }
}
