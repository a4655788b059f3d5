use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(what: &str, id: i64) -> Self {
        ServiceError::NotFound(format!("{what} {id} not found"))
    }
}

/// True when the storage layer rejected a write because of a unique index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || err.to_string().contains("UNIQUE constraint failed")
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BulkFailure {
    pub id: i64,
    pub error: String,
}

/// Result of a bulk action. One bad item never aborts the rest of the batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkOutcome {
    pub succeeded: Vec<i64>,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn record<T>(&mut self, id: i64, result: Result<T, ServiceError>) {
        match result {
            Ok(_) => self.succeeded.push(id),
            Err(e) => {
                tracing::warn!(target: "services", id, error = %e, "bulk item failed");
                self.failed.push(BulkFailure {
                    id,
                    error: e.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_sqlite_unique_message() {
        let err = DbErr::Custom("UNIQUE constraint failed: candidates.registration_number".into());
        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&DbErr::Custom("disk I/O error".into())));
    }

    #[test]
    fn bulk_outcome_keeps_going_after_failure() {
        let mut outcome = BulkOutcome::default();
        outcome.record(1, Ok::<_, ServiceError>(()));
        outcome.record::<()>(2, Err(ServiceError::Validation("bad".into())));
        outcome.record(3, Ok::<_, ServiceError>(()));
        assert_eq!(outcome.succeeded, vec![1, 3]);
        assert_eq!(
            outcome.failed,
            vec![BulkFailure {
                id: 2,
                error: "bad".into()
            }]
        );
    }
}
