use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::MeetStore;
use crate::error::{Result, StorageError};
use crate::models::{
    ATTEMPTS_PER_LIFT, Athlete, Attempt, AttemptStatus, Event, LiftType, NewAttempt, Submission,
};

#[derive(Default)]
struct MemoryState {
    athletes: Vec<Athlete>,
    events: Vec<Event>,
    submissions: Vec<Submission>,
    attempts: Vec<Attempt>,
}

/// Process-local store. Every mutation runs under one write lock, which
/// serializes attempt updates the way row locks do in Postgres.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_athlete(&self, athlete: Athlete) {
        self.state.write().await.athletes.push(athlete);
    }

    pub async fn add_event(&self, event: Event) {
        self.state.write().await.events.push(event);
    }

    pub async fn add_submission(&self, submission: Submission) {
        self.state.write().await.submissions.push(submission);
    }
}

#[async_trait::async_trait]
impl MeetStore for MemoryStore {
    async fn find_athlete(&self, athlete_id: Uuid) -> Result<Athlete> {
        self.state
            .read()
            .await
            .athletes
            .iter()
            .find(|a| a.athlete_id == athlete_id)
            .cloned()
            .ok_or(StorageError::NotFound("Athlete"))
    }

    async fn find_event(&self, event_id: Uuid) -> Result<Event> {
        self.state
            .read()
            .await
            .events
            .iter()
            .find(|e| e.event_id == event_id)
            .cloned()
            .ok_or(StorageError::NotFound("Event"))
    }

    async fn find_submission(&self, athlete_id: Uuid, event_id: Uuid) -> Result<Submission> {
        self.state
            .read()
            .await
            .submissions
            .iter()
            .find(|s| s.athlete_id == athlete_id && s.event_id == event_id)
            .cloned()
            .ok_or(StorageError::NotFound("Player submission"))
    }

    async fn list_submissions(&self, event_id: Uuid) -> Result<Vec<Submission>> {
        Ok(self
            .state
            .read()
            .await
            .submissions
            .iter()
            .filter(|s| s.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn find_attempt(&self, attempt_id: Uuid) -> Result<Attempt> {
        self.state
            .read()
            .await
            .attempts
            .iter()
            .find(|a| a.attempt_id == attempt_id)
            .cloned()
            .ok_or(StorageError::NotFound("Attempt"))
    }

    async fn has_attempts(&self, athlete_id: Uuid, event_id: Uuid) -> Result<bool> {
        Ok(self
            .state
            .read()
            .await
            .attempts
            .iter()
            .any(|a| a.athlete_id == athlete_id && a.event_id == event_id))
    }

    async fn list_attempts(
        &self,
        event_id: Uuid,
        lift_type: Option<LiftType>,
    ) -> Result<Vec<Attempt>> {
        Ok(self
            .state
            .read()
            .await
            .attempts
            .iter()
            .filter(|a| a.event_id == event_id)
            .filter(|a| lift_type.is_none_or(|lift| a.lift_type == lift))
            .cloned()
            .collect())
    }

    async fn list_current_attempts(&self, event_id: Uuid) -> Result<Vec<(Attempt, Athlete)>> {
        let state = self.state.read().await;

        let mut lifters: Vec<(Attempt, Athlete)> = state
            .attempts
            .iter()
            .filter(|a| a.event_id == event_id && a.is_current)
            .filter_map(|attempt| {
                state
                    .athletes
                    .iter()
                    .find(|athlete| athlete.athlete_id == attempt.athlete_id)
                    .map(|athlete| (attempt.clone(), athlete.clone()))
            })
            .collect();

        lifters.sort_by(|(a, a_athlete), (b, b_athlete)| {
            (a.lift_type, a.attempt_number, &a_athlete.full_name).cmp(&(
                b.lift_type,
                b.attempt_number,
                &b_athlete.full_name,
            ))
        });

        Ok(lifters)
    }

    async fn insert_attempts(&self, attempts: &[NewAttempt]) -> Result<Vec<Attempt>> {
        let mut state = self.state.write().await;

        let duplicate = attempts.iter().any(|new| {
            state.attempts.iter().any(|a| {
                a.athlete_id == new.athlete_id
                    && a.event_id == new.event_id
                    && a.lift_type == new.lift_type
                    && a.attempt_number == new.attempt_number
            })
        });
        if duplicate {
            return Err(StorageError::ConstraintViolation(
                "Lift attempts already initialized".to_string(),
            ));
        }

        let now = chrono::Utc::now().naive_utc();
        let created: Vec<Attempt> = attempts
            .iter()
            .cloned()
            .map(|new| new.into_attempt(now))
            .collect();
        state.attempts.extend(created.iter().cloned());

        Ok(created)
    }

    async fn update_declared_weight(
        &self,
        attempt_id: Uuid,
        declared_weight: Decimal,
        expected_update_count: i16,
    ) -> Result<Option<Attempt>> {
        let mut state = self.state.write().await;

        let Some(attempt) = state.attempts.iter_mut().find(|a| {
            a.attempt_id == attempt_id && a.is_current && a.update_count == expected_update_count
        }) else {
            return Ok(None);
        };

        attempt.declared_weight = declared_weight;
        attempt.update_count += 1;

        Ok(Some(attempt.clone()))
    }

    async fn resolve_attempt(
        &self,
        attempt_id: Uuid,
        status: AttemptStatus,
        completed_at: NaiveDateTime,
    ) -> Result<(Attempt, Option<Attempt>)> {
        let mut state = self.state.write().await;

        let attempt = state
            .attempts
            .iter_mut()
            .find(|a| a.attempt_id == attempt_id)
            .ok_or(StorageError::NotFound("Attempt"))?;

        attempt.status = status;
        attempt.actual_weight = Some(attempt.declared_weight);
        attempt.is_current = false;
        attempt.completed_at = Some(completed_at);
        let resolved = attempt.clone();

        let successor_number = resolved.attempt_number + 1;
        if successor_number > ATTEMPTS_PER_LIFT {
            return Ok((resolved, None));
        }

        let mut next = None;
        for a in state.attempts.iter_mut().filter(|a| {
            a.athlete_id == resolved.athlete_id
                && a.event_id == resolved.event_id
                && a.lift_type == resolved.lift_type
        }) {
            a.is_current = a.attempt_number == successor_number;
            if a.is_current {
                next = Some(a.clone());
            }
        }

        Ok((resolved, next))
    }
}
