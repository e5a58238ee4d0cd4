//! Domain service for the ticket audit trail.
//!
//! Entries are append-only: after creation only the comment may be edited.

use crate::api::types::{CreateHistoryRequest, HistoryDto, UpdateHistoryRequest};
use crate::domain::{StatusError, TicketId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
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

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StatusError> for HistoryError {
    fn from(err: StatusError) -> Self {
        Self::InvalidStatus(err.to_string())
    }
}

impl From<sea_orm::DbErr> for HistoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for HistoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait HistoryService: Send + Sync {
    /// Records an entry. Status fields, when present, are stored in canonical
    /// display form.
    async fn create(&self, request: CreateHistoryRequest) -> Result<HistoryDto, HistoryError>;

    async fn get(&self, id: i32) -> Result<HistoryDto, HistoryError>;

    async fn list(&self) -> Result<Vec<HistoryDto>, HistoryError>;

    /// Entries for one ticket, newest first.
    async fn list_for_ticket(&self, ticket_id: TicketId) -> Result<Vec<HistoryDto>, HistoryError>;

    async fn update_comment(
        &self,
        id: i32,
        request: UpdateHistoryRequest,
    ) -> Result<HistoryDto, HistoryError>;
}
