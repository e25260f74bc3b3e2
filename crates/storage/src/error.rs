use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Update limit reached for attempt {0}")]
    QuotaExceeded(i16),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_messages() {
        assert_eq!(
            StorageError::NotFound("Player submission").to_string(),
            "Player submission not found"
        );
        assert_eq!(
            StorageError::QuotaExceeded(3).to_string(),
            "Update limit reached for attempt 3"
        );
    }

    #[test]
    fn test_domain_errors_are_not_unique_violations() {
        let err = StorageError::ConstraintViolation("dup".to_string());
        assert!(!err.is_unique_violation());
    }
}
