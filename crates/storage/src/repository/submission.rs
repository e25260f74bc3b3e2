use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool, types::Json};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{FormField, Submission};

#[derive(FromRow)]
struct SubmissionRow {
    submission_id: Uuid,
    athlete_id: Uuid,
    event_id: Uuid,
    form_fields: Json<Vec<FormField>>,
    created_at: NaiveDateTime,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            submission_id: row.submission_id,
            athlete_id: row.athlete_id,
            event_id: row.event_id,
            form_fields: row.form_fields.0,
            created_at: row.created_at,
        }
    }
}

/// Read access to registration submissions
pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, athlete_id: Uuid, event_id: Uuid) -> Result<Submission> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT submission_id, athlete_id, event_id, form_fields, created_at
            FROM player_submissions
            WHERE athlete_id = $1 AND event_id = $2
            "#,
        )
        .bind(athlete_id)
        .bind(event_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("Player submission"))?;

        Ok(row.into())
    }

    /// Submissions of an event in registration order
    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Submission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT submission_id, athlete_id, event_id, form_fields, created_at
            FROM player_submissions
            WHERE event_id = $1
            ORDER BY created_at, submission_id
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Submission::from).collect())
    }
}
