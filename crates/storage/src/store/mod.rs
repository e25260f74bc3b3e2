//! Persistence seam for the meet core.
//!
//! Services only talk to [`MeetStore`], so they run unchanged against
//! Postgres ([`crate::Database`]) or the in-memory [`MemoryStore`].
//! Lookups fail with [`StorageError::NotFound`](crate::error::StorageError)
//! naming the missing resource.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Athlete, Attempt, AttemptStatus, Event, LiftType, NewAttempt, Submission};

mod memory;
mod postgres;

pub use memory::MemoryStore;

#[async_trait::async_trait]
pub trait MeetStore: Send + Sync {
    async fn find_athlete(&self, athlete_id: Uuid) -> Result<Athlete>;

    async fn find_event(&self, event_id: Uuid) -> Result<Event>;

    async fn find_submission(&self, athlete_id: Uuid, event_id: Uuid) -> Result<Submission>;

    async fn list_submissions(&self, event_id: Uuid) -> Result<Vec<Submission>>;

    async fn find_attempt(&self, attempt_id: Uuid) -> Result<Attempt>;

    async fn has_attempts(&self, athlete_id: Uuid, event_id: Uuid) -> Result<bool>;

    async fn list_attempts(
        &self,
        event_id: Uuid,
        lift_type: Option<LiftType>,
    ) -> Result<Vec<Attempt>>;

    async fn list_current_attempts(&self, event_id: Uuid) -> Result<Vec<(Attempt, Athlete)>>;

    /// Persist a full attempt set atomically. A duplicate
    /// (athlete, event, lift type, attempt number) fails the whole batch.
    async fn insert_attempts(&self, attempts: &[NewAttempt]) -> Result<Vec<Attempt>>;

    /// Compare-and-swap weight change: applies only while the attempt is
    /// current and its update count still equals `expected_update_count`.
    async fn update_declared_weight(
        &self,
        attempt_id: Uuid,
        declared_weight: Decimal,
        expected_update_count: i16,
    ) -> Result<Option<Attempt>>;

    /// Resolve an attempt and make its successor current in one write.
    async fn resolve_attempt(
        &self,
        attempt_id: Uuid,
        status: AttemptStatus,
        completed_at: NaiveDateTime,
    ) -> Result<(Attempt, Option<Attempt>)>;
}
