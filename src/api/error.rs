use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::{HistoryError, ReferenceError, TicketError, UserError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    Conflict(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<TicketError> for ApiError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::NotFound { .. } => Self::NotFound(err.to_string()),
            TicketError::InvalidReference { .. }
            | TicketError::MissingRequiredField(_)
            | TicketError::InvalidStatus(_)
            | TicketError::InvalidInput(_) => Self::ValidationError(err.to_string()),
            TicketError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NotFound { .. } => Self::NotFound(err.to_string()),
            HistoryError::InvalidReference { .. }
            | HistoryError::MissingRequiredField(_)
            | HistoryError::InvalidStatus(_) => Self::ValidationError(err.to_string()),
            HistoryError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<ReferenceError> for ApiError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::NotFound { .. } => Self::NotFound(err.to_string()),
            ReferenceError::Validation(msg) => Self::ValidationError(msg),
            ReferenceError::Conflict { .. } | ReferenceError::InUse { .. } => {
                Self::Conflict(err.to_string())
            }
            ReferenceError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self::NotFound(err.to_string()),
            UserError::Validation(msg) => Self::ValidationError(msg),
            UserError::Conflict(_) | UserError::InUse { .. } => Self::Conflict(err.to_string()),
            UserError::Database(msg) => Self::DatabaseError(msg),
            UserError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_errors_map_to_status_codes() {
        let cases = [
            (
                TicketError::NotFound {
                    resource: "Ticket",
                    id: 1,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                TicketError::MissingRequiredField("submitterId"),
                StatusCode::BAD_REQUEST,
            ),
            (
                TicketError::InvalidStatus("Invalid status: x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                TicketError::Database("locked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn in_use_reference_is_conflict() {
        let err = ReferenceError::InUse {
            kind: crate::domain::LookupKind::Priority,
            id: 2,
            count: 3,
        };
        assert_eq!(
            ApiError::from(err).into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
