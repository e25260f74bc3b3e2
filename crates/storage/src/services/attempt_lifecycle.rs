//! Attempt state machine: seeding, weight changes and resolution.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::attempt::{AthleteSummary, CurrentLifter};
use crate::error::{Result, StorageError};
use crate::models::{ATTEMPTS_PER_LIFT, Attempt, AttemptStatus, LiftType, NewAttempt};
use crate::store::MeetStore;

/// Outcome of an official's decision on an attempt
#[derive(Debug, Clone)]
pub struct Resolution {
    pub resolved: Attempt,
    pub next: Option<Attempt>,
}

/// The nine attempts of a fresh athlete: the opener is declared and current
/// for every lift, attempts 2 and 3 wait at zero.
pub fn seed_attempts(athlete_id: Uuid, event_id: Uuid, opening_weight: Decimal) -> Vec<NewAttempt> {
    LiftType::ALL
        .into_iter()
        .flat_map(|lift_type| {
            (1..=ATTEMPTS_PER_LIFT).map(move |attempt_number| NewAttempt {
                attempt_id: Uuid::new_v4(),
                athlete_id,
                event_id,
                lift_type,
                attempt_number,
                declared_weight: if attempt_number == 1 {
                    opening_weight
                } else {
                    Decimal::ZERO
                },
                is_current: attempt_number == 1,
            })
        })
        .collect()
}

/// Checks whether the athlete may still change the declared weight.
pub fn ensure_weight_editable(attempt: &Attempt) -> Result<()> {
    if attempt.attempt_number == 1 {
        return Err(StorageError::InvalidState(
            "First attempt weight cannot be changed".to_string(),
        ));
    }

    if !attempt.is_current {
        return Err(StorageError::InvalidState(
            "Cannot update non-current attempt".to_string(),
        ));
    }

    if attempt.update_count >= attempt.max_updates() {
        return Err(StorageError::QuotaExceeded(attempt.attempt_number));
    }

    Ok(())
}

pub async fn initialize(
    store: &dyn MeetStore,
    athlete_id: Uuid,
    event_id: Uuid,
) -> Result<Vec<Attempt>> {
    store.find_athlete(athlete_id).await?;
    store.find_event(event_id).await?;
    let submission = store.find_submission(athlete_id, event_id).await?;

    if store.has_attempts(athlete_id, event_id).await? {
        return Err(StorageError::ConstraintViolation(
            "Lift attempts already initialized".to_string(),
        ));
    }

    let opening_weight = submission.opening_weight();
    let attempts = store
        .insert_attempts(&seed_attempts(athlete_id, event_id, opening_weight))
        .await?;

    tracing::info!(
        %athlete_id,
        %event_id,
        %opening_weight,
        "Initialized {} lift attempts",
        attempts.len()
    );

    Ok(attempts)
}

pub async fn submit_next_weight(
    store: &dyn MeetStore,
    attempt_id: Uuid,
    next_weight: Decimal,
) -> Result<Attempt> {
    let attempt = store.find_attempt(attempt_id).await?;
    change_declared_weight(store, &attempt, next_weight).await
}

/// Weight change on an attempt the caller already loaded.
pub async fn change_declared_weight(
    store: &dyn MeetStore,
    attempt: &Attempt,
    next_weight: Decimal,
) -> Result<Attempt> {
    let attempt_id = attempt.attempt_id;
    ensure_weight_editable(attempt)?;

    if let Some(updated) = store
        .update_declared_weight(attempt_id, next_weight, attempt.update_count)
        .await?
    {
        tracing::info!(
            %attempt_id,
            lift_type = %updated.lift_type,
            attempt_number = updated.attempt_number,
            declared_weight = %updated.declared_weight,
            "Next weight submitted"
        );
        return Ok(updated);
    }

    // Lost a race with another writer: report what the attempt looks like now.
    let current = store.find_attempt(attempt_id).await?;
    ensure_weight_editable(&current)?;

    tracing::warn!(%attempt_id, "Concurrent weight change rejected");
    Err(StorageError::ConstraintViolation(
        "Attempt was modified concurrently, please retry".to_string(),
    ))
}

pub async fn resolve_attempt(
    store: &dyn MeetStore,
    attempt_id: Uuid,
    status: AttemptStatus,
) -> Result<Resolution> {
    let completed_at = chrono::Utc::now().naive_utc();
    let (resolved, next) = store
        .resolve_attempt(attempt_id, status, completed_at)
        .await?;

    tracing::info!(
        %attempt_id,
        athlete_id = %resolved.athlete_id,
        lift_type = %resolved.lift_type,
        attempt_number = resolved.attempt_number,
        status = ?resolved.status,
        next_attempt = ?next.as_ref().map(|a| a.attempt_number),
        "Attempt resolved"
    );

    Ok(Resolution { resolved, next })
}

pub async fn current_lifters(store: &dyn MeetStore, event_id: Uuid) -> Result<Vec<CurrentLifter>> {
    let lifters = store
        .list_current_attempts(event_id)
        .await?
        .into_iter()
        .map(|(attempt, athlete)| CurrentLifter {
            attempt,
            athlete: AthleteSummary::from(athlete),
        })
        .collect();

    Ok(lifters)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{Athlete, Event, FormField, Submission, fields};
    use crate::store::MemoryStore;

    struct Meet {
        store: MemoryStore,
        athlete_id: Uuid,
        event_id: Uuid,
    }

    async fn meet_with_submission(form_fields: Vec<FormField>) -> Meet {
        let store = MemoryStore::new();
        let athlete_id = Uuid::new_v4();
        let event_id = Uuid::new_v4();
        let now = chrono::Utc::now().naive_utc();

        store
            .add_athlete(Athlete {
                athlete_id,
                full_name: "Jane Doe".to_string(),
                gender: Some("female".to_string()),
                weight: Some(Decimal::new(63, 0)),
            })
            .await;
        store
            .add_event(Event {
                event_id,
                name: "Spring Open".to_string(),
                created_at: now,
            })
            .await;
        store
            .add_submission(Submission {
                submission_id: Uuid::new_v4(),
                athlete_id,
                event_id,
                form_fields,
                created_at: now,
            })
            .await;

        Meet {
            store,
            athlete_id,
            event_id,
        }
    }

    async fn initialized_meet() -> (Meet, Vec<Attempt>) {
        let meet =
            meet_with_submission(vec![FormField::new(fields::OPENING_WEIGHT, "120")]).await;
        let attempts = initialize(&meet.store, meet.athlete_id, meet.event_id)
            .await
            .unwrap();
        (meet, attempts)
    }

    fn find(attempts: &[Attempt], lift_type: LiftType, attempt_number: i16) -> Attempt {
        attempts
            .iter()
            .find(|a| a.lift_type == lift_type && a.attempt_number == attempt_number)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_seed_attempts_layout() {
        let seeded = seed_attempts(Uuid::new_v4(), Uuid::new_v4(), Decimal::new(100, 0));

        assert_eq!(seeded.len(), 9);
        for lift_type in LiftType::ALL {
            let numbers: Vec<i16> = seeded
                .iter()
                .filter(|a| a.lift_type == lift_type)
                .map(|a| a.attempt_number)
                .collect();
            assert_eq!(numbers, vec![1, 2, 3]);
        }
    }

    #[tokio::test]
    async fn test_initialize_creates_nine_attempts() {
        let (_, attempts) = initialized_meet().await;

        assert_eq!(attempts.len(), 9);

        let current: Vec<&Attempt> = attempts.iter().filter(|a| a.is_current).collect();
        assert_eq!(current.len(), 3);
        assert!(current.iter().all(|a| a.attempt_number == 1));

        for attempt in &attempts {
            let expected = if attempt.attempt_number == 1 {
                Decimal::new(120, 0)
            } else {
                Decimal::ZERO
            };
            assert_eq!(attempt.declared_weight, expected);
            assert_eq!(attempt.status, AttemptStatus::Pending);
            assert_eq!(attempt.update_count, 0);
        }
    }

    #[tokio::test]
    async fn test_initialize_without_opening_weight_uses_zero() {
        let meet = meet_with_submission(vec![FormField::new(fields::TEAM, "Barbell Club")]).await;
        let attempts = initialize(&meet.store, meet.athlete_id, meet.event_id)
            .await
            .unwrap();

        assert!(attempts.iter().all(|a| a.declared_weight == Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_initialize_requires_known_records() {
        let meet = meet_with_submission(vec![]).await;

        let err = initialize(&meet.store, Uuid::new_v4(), meet.event_id)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Athlete")));

        let err = initialize(&meet.store, meet.athlete_id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Event")));
    }

    #[tokio::test]
    async fn test_initialize_requires_submission() {
        let meet = meet_with_submission(vec![]).await;
        let other_event = Uuid::new_v4();
        meet.store
            .add_event(Event {
                event_id: other_event,
                name: "Winter Classic".to_string(),
                created_at: chrono::Utc::now().naive_utc(),
            })
            .await;

        let err = initialize(&meet.store, meet.athlete_id, other_event)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Player submission")));
    }

    #[tokio::test]
    async fn test_initialize_twice_is_rejected() {
        let (meet, _) = initialized_meet().await;

        let err = initialize(&meet.store, meet.athlete_id, meet.event_id)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));

        let all = meet.store.list_attempts(meet.event_id, None).await.unwrap();
        assert_eq!(all.len(), 9);
    }

    #[tokio::test]
    async fn test_first_attempt_is_immutable() {
        let (meet, attempts) = initialized_meet().await;
        let opener = find(&attempts, LiftType::Squat, 1);

        let err = submit_next_weight(&meet.store, opener.attempt_id, Decimal::new(125, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidState(_)));

        // Still immutable once it is no longer current
        resolve_attempt(&meet.store, opener.attempt_id, AttemptStatus::Good)
            .await
            .unwrap();
        let err = submit_next_weight(&meet.store, opener.attempt_id, Decimal::new(125, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_non_current_attempt_cannot_change() {
        let (meet, attempts) = initialized_meet().await;
        let second = find(&attempts, LiftType::Bench, 2);

        let err = submit_next_weight(&meet.store, second.attempt_id, Decimal::new(80, 0))
            .await
            .unwrap_err();
        match err {
            StorageError::InvalidState(msg) => {
                assert_eq!(msg, "Cannot update non-current attempt")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_attempt_allows_one_change() {
        let (meet, attempts) = initialized_meet().await;
        resolve_attempt(
            &meet.store,
            find(&attempts, LiftType::Squat, 1).attempt_id,
            AttemptStatus::Good,
        )
        .await
        .unwrap();
        let second = find(&attempts, LiftType::Squat, 2);

        let updated = submit_next_weight(&meet.store, second.attempt_id, Decimal::new(130, 0))
            .await
            .unwrap();
        assert_eq!(updated.declared_weight, Decimal::new(130, 0));
        assert_eq!(updated.update_count, 1);

        let err = submit_next_weight(&meet.store, second.attempt_id, Decimal::new(135, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded(2)));

        let stored = meet.store.find_attempt(second.attempt_id).await.unwrap();
        assert_eq!(stored.declared_weight, Decimal::new(130, 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_changes_spend_quota_once() {
        let (meet, attempts) = initialized_meet().await;
        resolve_attempt(
            &meet.store,
            find(&attempts, LiftType::Squat, 1).attempt_id,
            AttemptStatus::Good,
        )
        .await
        .unwrap();
        let second = find(&attempts, LiftType::Squat, 2).attempt_id;
        let store = Arc::new(meet.store);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    submit_next_weight(store.as_ref(), second, Decimal::new(130 + i, 0)).await
                })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(err) => assert!(matches!(err, StorageError::QuotaExceeded(2)), "{err:?}"),
            }
        }

        assert_eq!(succeeded, 1);
        let stored = store.find_attempt(second).await.unwrap();
        assert_eq!(stored.update_count, 1);
    }

    #[tokio::test]
    async fn test_third_attempt_allows_two_changes() {
        let (meet, attempts) = initialized_meet().await;
        for number in [1, 2] {
            resolve_attempt(
                &meet.store,
                find(&attempts, LiftType::Deadlift, number).attempt_id,
                AttemptStatus::Good,
            )
            .await
            .unwrap();
        }
        let third = find(&attempts, LiftType::Deadlift, 3);

        for weight in [200, 205] {
            submit_next_weight(&meet.store, third.attempt_id, Decimal::new(weight, 0))
                .await
                .unwrap();
        }

        let err = submit_next_weight(&meet.store, third.attempt_id, Decimal::new(210, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded(3)));
    }

    #[tokio::test]
    async fn test_resolving_opener_activates_second() {
        let (meet, attempts) = initialized_meet().await;
        let opener = find(&attempts, LiftType::Squat, 1);

        let resolution = resolve_attempt(&meet.store, opener.attempt_id, AttemptStatus::Good)
            .await
            .unwrap();

        assert!(!resolution.resolved.is_current);
        assert_eq!(resolution.resolved.status, AttemptStatus::Good);
        assert_eq!(resolution.resolved.actual_weight, Some(Decimal::new(120, 0)));
        assert!(resolution.resolved.completed_at.is_some());

        let next = resolution.next.unwrap();
        assert_eq!(next.attempt_number, 2);
        assert_eq!(next.lift_type, LiftType::Squat);
        assert!(next.is_current);

        // Other lifts keep their own pointer
        let bench_opener = meet
            .store
            .find_attempt(find(&attempts, LiftType::Bench, 1).attempt_id)
            .await
            .unwrap();
        assert!(bench_opener.is_current);
    }

    #[tokio::test]
    async fn test_resolving_third_attempt_has_no_successor() {
        let (meet, attempts) = initialized_meet().await;
        for number in [1, 2] {
            resolve_attempt(
                &meet.store,
                find(&attempts, LiftType::Bench, number).attempt_id,
                AttemptStatus::Fail,
            )
            .await
            .unwrap();
        }

        let resolution = resolve_attempt(
            &meet.store,
            find(&attempts, LiftType::Bench, 3).attempt_id,
            AttemptStatus::NoAttempt,
        )
        .await
        .unwrap();

        assert!(resolution.next.is_none());
        let bench = meet
            .store
            .list_attempts(meet.event_id, Some(LiftType::Bench))
            .await
            .unwrap();
        assert!(bench.iter().all(|a| !a.is_current));
    }

    #[tokio::test]
    async fn test_re_resolving_keeps_single_current_attempt() {
        let (meet, attempts) = initialized_meet().await;
        for number in [1, 2] {
            resolve_attempt(
                &meet.store,
                find(&attempts, LiftType::Squat, number).attempt_id,
                AttemptStatus::Good,
            )
            .await
            .unwrap();
        }

        // A corrected call on the opener moves the pointer back to attempt 2
        resolve_attempt(
            &meet.store,
            find(&attempts, LiftType::Squat, 1).attempt_id,
            AttemptStatus::Fail,
        )
        .await
        .unwrap();

        let squats = meet
            .store
            .list_attempts(meet.event_id, Some(LiftType::Squat))
            .await
            .unwrap();
        let current: Vec<i16> = squats
            .iter()
            .filter(|a| a.is_current)
            .map(|a| a.attempt_number)
            .collect();
        assert_eq!(current, vec![2]);
    }

    #[tokio::test]
    async fn test_resolve_unknown_attempt() {
        let (meet, _) = initialized_meet().await;

        let err = resolve_attempt(&meet.store, Uuid::new_v4(), AttemptStatus::Good)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Attempt")));
    }

    #[tokio::test]
    async fn test_current_lifters() {
        let (meet, attempts) = initialized_meet().await;

        let lifters = current_lifters(&meet.store, meet.event_id).await.unwrap();
        assert_eq!(lifters.len(), 3);
        assert!(lifters.iter().all(|l| l.athlete.full_name == "Jane Doe"));

        resolve_attempt(
            &meet.store,
            find(&attempts, LiftType::Squat, 1).attempt_id,
            AttemptStatus::Good,
        )
        .await
        .unwrap();

        let lifters = current_lifters(&meet.store, meet.event_id).await.unwrap();
        let squat = lifters
            .iter()
            .find(|l| l.attempt.lift_type == LiftType::Squat)
            .unwrap();
        assert_eq!(squat.attempt.attempt_number, 2);

        let empty = current_lifters(&meet.store, Uuid::new_v4()).await.unwrap();
        assert!(empty.is_empty());
    }
}
