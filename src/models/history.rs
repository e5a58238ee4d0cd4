use crate::domain::TicketId;
use serde::{Deserialize, Serialize};

/// One audit-trail record for a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i32,
    pub ticket_id: TicketId,
    pub user_id: i32,
    pub comment: Option<String>,
    pub status_change_from: Option<String>,
    pub status_change_to: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub ticket_id: TicketId,
    pub user_id: i32,
    pub comment: Option<String>,
    pub status_change_from: Option<String>,
    pub status_change_to: Option<String>,
}
