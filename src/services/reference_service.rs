//! Domain service for administering the priority and category tables.

use crate::api::types::{LookupDto, LookupRequest, StatusOptionDto};
use crate::domain::LookupKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("{kind} {id} not found")]
    NotFound { kind: LookupKind, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{kind} '{name}' already exists")]
    Conflict { kind: LookupKind, name: String },

    #[error("{kind} {id} is still referenced by {count} ticket(s)")]
    InUse {
        kind: LookupKind,
        id: i32,
        count: u64,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ReferenceError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReferenceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait ReferenceService: Send + Sync {
    async fn list(&self, kind: LookupKind) -> Result<Vec<LookupDto>, ReferenceError>;

    async fn get(&self, kind: LookupKind, id: i32) -> Result<LookupDto, ReferenceError>;

    /// Names are unique per table, compared case-insensitively.
    async fn create(
        &self,
        kind: LookupKind,
        request: LookupRequest,
    ) -> Result<LookupDto, ReferenceError>;

    async fn update(
        &self,
        kind: LookupKind,
        id: i32,
        request: LookupRequest,
    ) -> Result<LookupDto, ReferenceError>;

    /// Refused while any ticket still points at the row.
    async fn delete(&self, kind: LookupKind, id: i32) -> Result<(), ReferenceError>;

    /// The canonical ticket statuses in lifecycle order.
    fn statuses(&self) -> Vec<StatusOptionDto>;
}
