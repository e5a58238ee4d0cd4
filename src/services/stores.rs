//! Persistence seams consumed by the ticket services.
//!
//! The ticket lifecycle and history services only see these traits, so they
//! can run against the SeaORM-backed [`Store`](crate::db::Store) in
//! production and against in-memory fakes in tests.

use anyhow::Result;

use crate::domain::{LookupKind, TicketId};
use crate::models::{HistoryEntry, LookupEntry, NewHistoryEntry, NewTicket, Ticket, User};

/// Read-only access to the reference tables tickets point into.
#[async_trait::async_trait]
pub trait ReferenceStore: Send + Sync {
    async fn find_lookup_by_id(&self, kind: LookupKind, id: i32) -> Result<Option<LookupEntry>>;

    /// Case-insensitive match on the trimmed name.
    async fn find_lookup_by_name(
        &self,
        kind: LookupKind,
        name: &str,
    ) -> Result<Option<LookupEntry>>;

    /// Every configured name for the table, in storage order.
    async fn lookup_names(&self, kind: LookupKind) -> Result<Vec<String>>;

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>>;
}

#[async_trait::async_trait]
pub trait TicketStore: Send + Sync {
    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket>;

    async fn save_ticket(&self, ticket: &Ticket) -> Result<Ticket>;

    /// Saves the ticket and appends `entry` as one unit: on failure neither
    /// write is kept.
    async fn save_status_change(&self, ticket: &Ticket, entry: NewHistoryEntry) -> Result<Ticket>;

    async fn find_ticket(&self, id: TicketId) -> Result<Option<Ticket>>;

    /// Returns `false` when no row had that ID.
    async fn delete_ticket(&self, id: TicketId) -> Result<bool>;

    async fn list_tickets(&self) -> Result<Vec<Ticket>>;
}

#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    async fn insert_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry>;

    async fn find_history(&self, id: i32) -> Result<Option<HistoryEntry>>;

    async fn list_history(&self) -> Result<Vec<HistoryEntry>>;

    /// Newest first.
    async fn list_history_for_ticket(&self, ticket_id: TicketId) -> Result<Vec<HistoryEntry>>;

    async fn update_history_comment(
        &self,
        id: i32,
        comment: Option<String>,
    ) -> Result<Option<HistoryEntry>>;
}
