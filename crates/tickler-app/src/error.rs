use salvo::http::StatusCode;
use salvo::writing::{Json, Text};
use salvo::Response;
use serde::Serialize;
use thiserror::Error;

use tickler_db::error::DbError;
use tickler_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    RuleError(#[from] tickler_rule::RuleError),

    #[error(transparent)]
    CoreError(#[from] tickler_core::error::CoreError),

    #[error("{0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Maps the error kind to a response status.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::RuleError(_) => StatusCode::BAD_REQUEST,
            Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceError(err) => match err {
                ServiceError::ValidationError(_)
                | ServiceError::InvalidId(_)
                | ServiceError::RuleError(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::DatabaseError(DbError::PoolError(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                ServiceError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Client-facing message. Server-side failures are not described.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self.status_code() {
            StatusCode::SERVICE_UNAVAILABLE => "storage unavailable".to_string(),
            status if status.is_server_error() => "internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    fn log(&self, status: StatusCode) {
        if status.is_server_error() {
            tracing::error!(error = ?self, %status, "Request failed");
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }
    }

    /// Writes the error as a `{"error": ...}` JSON body.
    pub fn render_json(&self, res: &mut Response) {
        let status = self.status_code();
        self.log(status);
        res.status_code(status);
        res.render(Json(ErrorResponse {
            error: self.public_message(),
        }));
    }

    /// Writes the error as a plain text body.
    pub fn render_text(&self, res: &mut Response) {
        let status = self.status_code();
        self.log(status);
        res.status_code(status);
        res.render(Text::Plain(self.public_message()));
    }
}

#[cfg(test)]
mod tests {
    use tickler_rule::{ParseError, RuleError};

    use super::*;

    #[test]
    fn status_follows_error_kind() {
        let cases = [
            (
                AppError::from(ServiceError::ValidationError("task title is required")),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(ServiceError::InvalidId("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::from(ServiceError::NotFound(4)), StatusCode::NOT_FOUND),
            (
                AppError::from(ServiceError::from(DbError::NotFound(4))),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(ServiceError::from(DbError::MigrationError("x".to_string()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(RuleError::from(ParseError::unknown_kind("x"))),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(RuleError::SearchExhausted { limit: 800 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(ServiceError::from(RuleError::InvalidDateFormat(
                    "2024".to_string(),
                ))),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(tickler_core::error::CoreError::InvariantViolation("x")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err:?}");
        }
    }

    #[test]
    fn server_errors_are_not_described() {
        let err = AppError::from(ServiceError::from(DbError::MigrationError(
            "password=hunter2".to_string(),
        )));
        assert_eq!(err.public_message(), "internal server error");

        let err = AppError::from(ServiceError::NotFound(4));
        assert_eq!(err.public_message(), "task not found: 4");
    }
}
