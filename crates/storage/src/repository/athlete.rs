use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Athlete;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, athlete_id: Uuid) -> Result<Athlete> {
        let athlete = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT athlete_id, full_name, gender, weight
            FROM athletes
            WHERE athlete_id = $1
            "#,
        )
        .bind(athlete_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("Athlete"))?;

        Ok(athlete)
    }
}
