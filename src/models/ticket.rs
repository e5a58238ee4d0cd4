use crate::domain::{TicketId, TicketStatus};
use serde::{Deserialize, Serialize};

/// Persisted ticket aggregate. References are stored as foreign keys; the
/// rows they point to are shared with other tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub priority_id: i32,
    pub category_id: i32,
    pub submitter_id: Option<i32>,
    pub assigned_agent_id: Option<i32>,
    pub status: TicketStatus,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub resolved_at: Option<String>,
}

/// A fully resolved ticket that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority_id: i32,
    pub category_id: i32,
    pub submitter_id: i32,
    pub assigned_agent_id: Option<i32>,
    pub status: TicketStatus,
    pub created_at: String,
}
