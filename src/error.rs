//! Application error type and its HTTP representation.
//!
//! Every failure leaving a service is an [`AppError`]. Handlers return it
//! directly; [`IntoResponse`] turns it into
//! `{"error": {"code", "message", "details"}}` with a matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::validation::FieldErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Validation failure carrying the collected field errors.
    pub fn invalid_fields(errors: FieldErrors) -> Self {
        Self::bad_request("Validation failed", json!({ "fields": errors }))
    }

    /// Missing entity, phrased as "<Entity> not found with id: <id>".
    pub fn entity_not_found(entity: &str, id: i64) -> Self {
        Self::not_found(
            format!("{entity} not found with id: {id}"),
            json!({ "entity": entity, "id": id }),
        )
    }

    /// Field errors carried in `details.fields`, if any.
    pub fn field_errors(&self) -> Option<&Value> {
        match self {
            AppError::Validation { details, .. } | AppError::NotFound { details, .. } => {
                details.get("fields")
            }
            _ => None,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    /// Converts into the payload used in response bodies.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.parts();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };
        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidArgument(reason) => {
                AppError::bad_request(reason, json!({ "kind": "invalid_argument" }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        tracing::error!(error = %e, "Migration failed");
        AppError::internal("Migration error", json!({}))
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    tracing::error!(error = %e, "Database error");
    AppError::internal("Database error", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::Reason;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::entity_not_found("Owner", 3).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("x", json!({})).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_entity_not_found_message() {
        let err = AppError::entity_not_found("Owner", 42);
        assert_eq!(err.to_string(), "Owner not found with id: 42");
    }

    #[test]
    fn test_invalid_fields_details() {
        let mut errors = FieldErrors::new();
        errors.reject("type", Reason::Required);
        let err = AppError::invalid_fields(errors);

        let fields = err.field_errors().unwrap();
        assert_eq!(fields[0]["field"], "type");
        assert_eq!(fields[0]["code"], "required");
    }

    #[test]
    fn test_domain_error_is_bad_request() {
        let err: AppError = DomainError::InvalidArgument("Invalid Pet identifier!").into();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Invalid Pet identifier!");
    }

    #[test]
    fn test_row_not_found_maps_to_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
