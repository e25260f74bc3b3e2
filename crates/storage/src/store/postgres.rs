use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::MeetStore;
use crate::Database;
use crate::error::Result;
use crate::models::{Athlete, Attempt, AttemptStatus, Event, LiftType, NewAttempt, Submission};
use crate::repository::{
    athlete::AthleteRepository, attempt::AttemptRepository, event::EventRepository,
    submission::SubmissionRepository,
};

#[async_trait::async_trait]
impl MeetStore for Database {
    async fn find_athlete(&self, athlete_id: Uuid) -> Result<Athlete> {
        AthleteRepository::new(self.pool()).find_by_id(athlete_id).await
    }

    async fn find_event(&self, event_id: Uuid) -> Result<Event> {
        EventRepository::new(self.pool()).find_by_id(event_id).await
    }

    async fn find_submission(&self, athlete_id: Uuid, event_id: Uuid) -> Result<Submission> {
        SubmissionRepository::new(self.pool())
            .find(athlete_id, event_id)
            .await
    }

    async fn list_submissions(&self, event_id: Uuid) -> Result<Vec<Submission>> {
        SubmissionRepository::new(self.pool())
            .list_by_event(event_id)
            .await
    }

    async fn find_attempt(&self, attempt_id: Uuid) -> Result<Attempt> {
        AttemptRepository::new(self.pool()).find_by_id(attempt_id).await
    }

    async fn has_attempts(&self, athlete_id: Uuid, event_id: Uuid) -> Result<bool> {
        AttemptRepository::new(self.pool())
            .exists_for(athlete_id, event_id)
            .await
    }

    async fn list_attempts(
        &self,
        event_id: Uuid,
        lift_type: Option<LiftType>,
    ) -> Result<Vec<Attempt>> {
        AttemptRepository::new(self.pool())
            .list_by_event(event_id, lift_type)
            .await
    }

    async fn list_current_attempts(&self, event_id: Uuid) -> Result<Vec<(Attempt, Athlete)>> {
        AttemptRepository::new(self.pool())
            .list_current_with_athletes(event_id)
            .await
    }

    async fn insert_attempts(&self, attempts: &[NewAttempt]) -> Result<Vec<Attempt>> {
        AttemptRepository::new(self.pool()).insert_all(attempts).await
    }

    async fn update_declared_weight(
        &self,
        attempt_id: Uuid,
        declared_weight: Decimal,
        expected_update_count: i16,
    ) -> Result<Option<Attempt>> {
        AttemptRepository::new(self.pool())
            .update_declared_weight(attempt_id, declared_weight, expected_update_count)
            .await
    }

    async fn resolve_attempt(
        &self,
        attempt_id: Uuid,
        status: AttemptStatus,
        completed_at: NaiveDateTime,
    ) -> Result<(Attempt, Option<Attempt>)> {
        AttemptRepository::new(self.pool())
            .resolve(attempt_id, status, completed_at)
            .await
    }
}
