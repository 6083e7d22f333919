use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::db::StoreErrorKind;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    Conflict(String),

    ServiceUnavailable(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The data store is unavailable".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let message = format!("{err:#}");
        match StoreErrorKind::classify(&err) {
            StoreErrorKind::Integrity => Self::Conflict(message),
            StoreErrorKind::Reference => Self::ValidationError(message),
            StoreErrorKind::Connectivity => Self::ServiceUnavailable(message),
            StoreErrorKind::Other => Self::DatabaseError(message),
        }
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::not_found("User", "x"), StatusCode::NOT_FOUND),
            (ApiError::validation("bad"), StatusCode::BAD_REQUEST),
            (ApiError::conflict("dup"), StatusCode::CONFLICT),
            (
                ApiError::DatabaseError("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::ServiceUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_plain_anyhow_maps_to_database_error() {
        let err: ApiError = anyhow::anyhow!("query failed").into();
        assert!(matches!(err, ApiError::DatabaseError(_)));
    }
}
