//! Domain service for user administration.
//!
//! Passwords are hashed with Argon2id before they reach the store and are
//! never returned.

use crate::api::types::{CreateUserRequest, UpdateUserRequest, UserDto};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User {0} not found")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email '{0}' is already registered")]
    Conflict(String),

    #[error("User {id} is still referenced by {count} ticket(s) or history entries")]
    InUse { id: i32, count: u64 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn list(&self) -> Result<Vec<UserDto>, UserError>;

    async fn get(&self, id: i32) -> Result<UserDto, UserError>;

    /// Role falls back to `EMPLOYEE` when absent or unrecognized.
    async fn create(&self, request: CreateUserRequest) -> Result<UserDto, UserError>;

    /// Absent fields are left alone; an unrecognized role is ignored.
    async fn update(&self, id: i32, request: UpdateUserRequest) -> Result<UserDto, UserError>;

    /// Refused while the user has submitted tickets or authored history.
    async fn delete(&self, id: i32) -> Result<(), UserError>;
}
