use thiserror::Error;

use tickler_db::error::DbError;
use tickler_rule::RuleError;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    ValidationError(&'static str),

    #[error("invalid task id: {0:?}")]
    InvalidId(String),

    #[error("task not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    RuleError(#[from] RuleError),

    #[error(transparent)]
    DatabaseError(DbError),
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(id) => Self::NotFound(id),
            other => Self::DatabaseError(other),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
