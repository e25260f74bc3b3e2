use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{ATTEMPTS_PER_LIFT, Athlete, Attempt, AttemptStatus, LiftType, NewAttempt};

const ATTEMPT_COLUMNS: &str = r#"
    attempt_id, athlete_id, event_id, lift_type, attempt_number,
    declared_weight, actual_weight, status, is_current, update_count,
    completed_at, created_at
"#;

#[derive(FromRow)]
struct CurrentLifterRow {
    #[sqlx(flatten)]
    attempt: Attempt,
    #[sqlx(flatten)]
    athlete: Athlete,
}

/// Repository for lift attempt database operations
pub struct AttemptRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttemptRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, attempt_id: Uuid) -> Result<Attempt> {
        let attempt = sqlx::query_as::<_, Attempt>(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM lift_attempts WHERE attempt_id = $1"
        ))
        .bind(attempt_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("Attempt"))?;

        Ok(attempt)
    }

    pub async fn exists_for(&self, athlete_id: Uuid, event_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM lift_attempts
                WHERE athlete_id = $1 AND event_id = $2
            )
            "#,
        )
        .bind(athlete_id)
        .bind(event_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// All attempts of an event, optionally restricted to one lift type
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
        lift_type: Option<LiftType>,
    ) -> Result<Vec<Attempt>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(ATTEMPT_COLUMNS);
        query.push(" FROM lift_attempts WHERE event_id = ");
        query.push_bind(event_id);

        if let Some(lift_type) = lift_type {
            query.push(" AND lift_type = ");
            query.push_bind(lift_type);
        }

        query.push(" ORDER BY athlete_id, lift_type, attempt_number");

        let attempts = query.build_query_as::<Attempt>().fetch_all(self.pool).await?;

        Ok(attempts)
    }

    pub async fn list_current_with_athletes(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<(Attempt, Athlete)>> {
        let rows = sqlx::query_as::<_, CurrentLifterRow>(
            r#"
            SELECT la.attempt_id, la.athlete_id, la.event_id, la.lift_type, la.attempt_number,
                   la.declared_weight, la.actual_weight, la.status, la.is_current,
                   la.update_count, la.completed_at, la.created_at,
                   a.full_name, a.gender, a.weight
            FROM lift_attempts la
            INNER JOIN athletes a ON a.athlete_id = la.athlete_id
            WHERE la.event_id = $1 AND la.is_current = true
            ORDER BY la.lift_type, la.attempt_number, a.full_name
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| (r.attempt, r.athlete)).collect())
    }

    /// Insert a full attempt set in one transaction
    pub async fn insert_all(&self, attempts: &[NewAttempt]) -> Result<Vec<Attempt>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(attempts.len());

        for attempt in attempts {
            let row = sqlx::query_as::<_, Attempt>(&format!(
                r#"
                INSERT INTO lift_attempts (
                    attempt_id, athlete_id, event_id, lift_type, attempt_number,
                    declared_weight, is_current
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {ATTEMPT_COLUMNS}
                "#
            ))
            .bind(attempt.attempt_id)
            .bind(attempt.athlete_id)
            .bind(attempt.event_id)
            .bind(attempt.lift_type)
            .bind(attempt.attempt_number)
            .bind(attempt.declared_weight)
            .bind(attempt.is_current)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_unique_violation() {
                    return StorageError::ConstraintViolation(
                        "Lift attempts already initialized".to_string(),
                    );
                }
                err
            })?;

            created.push(row);
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Conditional weight change. Returns `None` when the attempt is no longer
    /// current or its update count moved since it was read.
    pub async fn update_declared_weight(
        &self,
        attempt_id: Uuid,
        declared_weight: Decimal,
        expected_update_count: i16,
    ) -> Result<Option<Attempt>> {
        let attempt = sqlx::query_as::<_, Attempt>(&format!(
            r#"
            UPDATE lift_attempts
            SET declared_weight = $2,
                update_count = update_count + 1
            WHERE attempt_id = $1
              AND is_current = true
              AND update_count = $3
            RETURNING {ATTEMPT_COLUMNS}
            "#
        ))
        .bind(attempt_id)
        .bind(declared_weight)
        .bind(expected_update_count)
        .fetch_optional(self.pool)
        .await?;

        Ok(attempt)
    }

    /// Resolve an attempt and hand the current flag to its successor.
    pub async fn resolve(
        &self,
        attempt_id: Uuid,
        status: AttemptStatus,
        completed_at: NaiveDateTime,
    ) -> Result<(Attempt, Option<Attempt>)> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_as::<_, Attempt>(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM lift_attempts WHERE attempt_id = $1 FOR UPDATE"
        ))
        .bind(attempt_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound("Attempt"))?;

        let resolved = sqlx::query_as::<_, Attempt>(&format!(
            r#"
            UPDATE lift_attempts
            SET status = $2,
                actual_weight = declared_weight,
                is_current = false,
                completed_at = $3
            WHERE attempt_id = $1
            RETURNING {ATTEMPT_COLUMNS}
            "#
        ))
        .bind(attempt_id)
        .bind(status)
        .bind(completed_at)
        .fetch_one(&mut *tx)
        .await?;

        let successor_number = locked.attempt_number + 1;

        let next = if successor_number <= ATTEMPTS_PER_LIFT {
            // Clear first: the partial unique index is checked row by row.
            sqlx::query(
                r#"
                UPDATE lift_attempts
                SET is_current = false
                WHERE athlete_id = $1 AND event_id = $2 AND lift_type = $3
                  AND attempt_number <> $4 AND is_current = true
                "#,
            )
            .bind(locked.athlete_id)
            .bind(locked.event_id)
            .bind(locked.lift_type)
            .bind(successor_number)
            .execute(&mut *tx)
            .await?;

            sqlx::query_as::<_, Attempt>(&format!(
                r#"
                UPDATE lift_attempts
                SET is_current = true
                WHERE athlete_id = $1 AND event_id = $2 AND lift_type = $3
                  AND attempt_number = $4
                RETURNING {ATTEMPT_COLUMNS}
                "#
            ))
            .bind(locked.athlete_id)
            .bind(locked.event_id)
            .bind(locked.lift_type)
            .bind(successor_number)
            .fetch_optional(&mut *tx)
            .await?
        } else {
            None
        };

        tx.commit().await?;

        Ok((resolved, next))
    }
}
