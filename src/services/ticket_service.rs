//! Domain service for the ticket lifecycle.
//!
//! Creates, updates, transitions and deletes tickets. Identity fields are
//! resolved through [`IdentityResolver`](super::IdentityResolver) and status
//! tokens through [`TicketStatus::canonicalize`](crate::domain::TicketStatus).

use crate::api::types::{CreateTicketRequest, TicketDto, UpdateStatusRequest, UpdateTicketRequest};
use crate::domain::{StatusError, TicketId};
use thiserror::Error;

/// Errors specific to ticket operations.
#[derive(Debug, Error)]
pub enum TicketError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("Invalid {field}: {message}")]
    InvalidReference {
        field: &'static str,
        message: String,
    },

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("{0}")]
    InvalidStatus(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl TicketError {
    #[must_use]
    pub const fn ticket_not_found(id: TicketId) -> Self {
        Self::NotFound {
            resource: "Ticket",
            id: id.value(),
        }
    }

    /// The request field a validation failure is attributed to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidReference { field, .. } | Self::MissingRequiredField(field) => {
                Some(*field)
            }
            _ => None,
        }
    }
}

impl From<StatusError> for TicketError {
    fn from(err: StatusError) -> Self {
        match err {
            StatusError::Empty => Self::InvalidInput(err.to_string()),
            StatusError::Unknown { .. } => Self::InvalidStatus(err.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for TicketError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for TicketError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for tickets.
#[async_trait::async_trait]
pub trait TicketService: Send + Sync {
    /// Resolves every reference and stores a new ticket in the `New` state.
    /// Nothing is written when any field fails to resolve.
    async fn create(&self, request: CreateTicketRequest) -> Result<TicketDto, TicketError>;

    async fn get(&self, id: TicketId) -> Result<TicketDto, TicketError>;

    async fn list(&self) -> Result<Vec<TicketDto>, TicketError>;

    /// Applies the supplied fields; absent fields keep their stored values.
    async fn update(
        &self,
        id: TicketId,
        request: UpdateTicketRequest,
    ) -> Result<TicketDto, TicketError>;

    /// Moves the ticket to the canonical form of `request.status`. Any state
    /// is reachable from any other.
    async fn update_status(
        &self,
        id: TicketId,
        request: UpdateStatusRequest,
    ) -> Result<TicketDto, TicketError>;

    async fn delete(&self, id: TicketId) -> Result<(), TicketError>;
}
