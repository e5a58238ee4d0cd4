use serde::{Deserialize, Serialize};

use crate::domain::{Reference, Role, TicketStatus};
use crate::models::{HistoryEntry, LookupEntry, User};
use crate::services::identity_resolver::IdentityRequest;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// Tickets

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LookupSummary {
    pub id: i32,
    pub name: String,
}

impl From<LookupEntry> for LookupSummary {
    fn from(entry: LookupEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub priority: LookupSummary,
    pub category: LookupSummary,
    pub submitter: Option<UserSummary>,
    pub assigned_agent: Option<UserSummary>,
    pub status: TicketStatus,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub resolved_at: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority_id: Option<i32>,
    pub priority: Option<String>,
    pub category_id: Option<i32>,
    pub category: Option<String>,
    pub submitter_id: Option<i32>,
    pub assigned_agent_id: Option<i32>,
}

impl CreateTicketRequest {
    #[must_use]
    pub fn identity(&self) -> IdentityRequest {
        IdentityRequest {
            priority: Reference::from_parts(self.priority_id, self.priority.as_deref()),
            category: Reference::from_parts(self.category_id, self.category.as_deref()),
            submitter_id: self.submitter_id,
            assigned_agent_id: self.assigned_agent_id,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority_id: Option<i32>,
    pub priority: Option<String>,
    pub category_id: Option<i32>,
    pub category: Option<String>,
    pub submitter_id: Option<i32>,
    pub assigned_agent_id: Option<i32>,
}

impl UpdateTicketRequest {
    #[must_use]
    pub fn identity(&self) -> IdentityRequest {
        IdentityRequest {
            priority: Reference::from_parts(self.priority_id, self.priority.as_deref()),
            category: Reference::from_parts(self.category_id, self.category.as_deref()),
            submitter_id: self.submitter_id,
            assigned_agent_id: self.assigned_agent_id,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
    pub comment: Option<String>,
    /// Acting user. A history entry is written only when this is present.
    pub user_id: Option<i32>,
}

// History

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDto {
    pub id: i32,
    pub ticket_id: i32,
    pub user_id: i32,
    pub comment: Option<String>,
    pub status_change_from: Option<String>,
    pub status_change_to: Option<String>,
    pub timestamp: String,
}

impl From<HistoryEntry> for HistoryDto {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            ticket_id: entry.ticket_id.value(),
            user_id: entry.user_id,
            comment: entry.comment,
            status_change_from: entry.status_change_from,
            status_change_to: entry.status_change_to,
            timestamp: entry.timestamp,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistoryRequest {
    pub ticket_id: Option<i32>,
    pub user_id: Option<i32>,
    pub comment: Option<String>,
    pub status_change_from: Option<String>,
    pub status_change_to: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct UpdateHistoryRequest {
    pub comment: Option<String>,
}

// Lookups

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LookupDto {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<LookupEntry> for LookupDto {
    fn from(entry: LookupEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            description: entry.description,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LookupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusOptionDto {
    pub identifier: String,
    pub name: String,
}

impl From<TicketStatus> for StatusOptionDto {
    fn from(status: TicketStatus) -> Self {
        Self {
            identifier: status.identifier().to_string(),
            name: status.display_name().to_string(),
        }
    }
}

// Users

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub phone_number: Option<String>,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            name: user.name,
            phone_number: user.phone_number,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

// System

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthDto {
    pub status: String,
    pub database: String,
    pub version: String,
    pub uptime_seconds: u64,
}
