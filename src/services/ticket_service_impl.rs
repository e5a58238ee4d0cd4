//! Store-backed implementation of the `TicketService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::types::{
    CreateTicketRequest, LookupSummary, TicketDto, UpdateStatusRequest, UpdateTicketRequest,
    UserSummary,
};
use crate::domain::{LookupKind, TicketId, TicketStatus};
use crate::models::{NewHistoryEntry, NewTicket, Ticket};
use crate::services::identity_resolver::IdentityResolver;
use crate::services::stores::{ReferenceStore, TicketStore};
use crate::services::ticket_service::{TicketError, TicketService};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

pub struct DefaultTicketService {
    references: Arc<dyn ReferenceStore>,
    tickets: Arc<dyn TicketStore>,
}

impl DefaultTicketService {
    #[must_use]
    pub fn new(references: Arc<dyn ReferenceStore>, tickets: Arc<dyn TicketStore>) -> Self {
        Self {
            references,
            tickets,
        }
    }

    fn resolver(&self) -> IdentityResolver<'_> {
        IdentityResolver::new(self.references.as_ref())
    }

    async fn load(&self, id: TicketId) -> Result<Ticket, TicketError> {
        self.tickets
            .find_ticket(id)
            .await?
            .ok_or_else(|| TicketError::ticket_not_found(id))
    }

    async fn lookup_summary(
        &self,
        ticket_id: TicketId,
        kind: LookupKind,
        id: i32,
    ) -> Result<LookupSummary, TicketError> {
        self.references
            .find_lookup_by_id(kind, id)
            .await?
            .map(LookupSummary::from)
            .ok_or_else(|| {
                TicketError::Database(format!(
                    "Ticket {ticket_id} references missing {kind} {id}"
                ))
            })
    }

    async fn user_summary(&self, id: Option<i32>) -> Result<Option<UserSummary>, TicketError> {
        let Some(id) = id else {
            return Ok(None);
        };
        Ok(self
            .references
            .find_user_by_id(id)
            .await?
            .map(UserSummary::from))
    }

    async fn to_dto(&self, ticket: Ticket) -> Result<TicketDto, TicketError> {
        let priority = self
            .lookup_summary(ticket.id, LookupKind::Priority, ticket.priority_id)
            .await?;
        let category = self
            .lookup_summary(ticket.id, LookupKind::Category, ticket.category_id)
            .await?;
        let submitter = self.user_summary(ticket.submitter_id).await?;
        let assigned_agent = self.user_summary(ticket.assigned_agent_id).await?;

        Ok(TicketDto {
            id: ticket.id.value(),
            title: ticket.title,
            description: ticket.description,
            priority,
            category,
            submitter,
            assigned_agent,
            status: ticket.status,
            comment: ticket.comment,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            resolved_at: ticket.resolved_at,
        })
    }
}

/// Trims a required free-text field and enforces its length limit.
fn validate_text(field: &str, value: Option<&str>, max_len: usize) -> Result<String, TicketError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(TicketError::InvalidInput(format!("{field} must not be blank")));
    }
    if value.chars().count() > max_len {
        return Err(TicketError::InvalidInput(format!(
            "{field} must be {max_len} characters or less"
        )));
    }
    Ok(value.to_string())
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Applies a status change to the aggregate. `resolved_at` is stamped on the
/// first move into a terminal state and cleared when the ticket is reopened.
fn apply_status(ticket: &mut Ticket, status: TicketStatus, comment: Option<&str>, at: &str) {
    ticket.status = status;
    if let Some(comment) = comment.map(str::trim).filter(|c| !c.is_empty()) {
        ticket.comment = Some(comment.to_string());
    }
    if status.is_terminal() {
        if ticket.resolved_at.is_none() {
            ticket.resolved_at = Some(at.to_string());
        }
    } else {
        ticket.resolved_at = None;
    }
    ticket.updated_at = at.to_string();
}

#[async_trait]
impl TicketService for DefaultTicketService {
    async fn create(&self, request: CreateTicketRequest) -> Result<TicketDto, TicketError> {
        let title = validate_text("title", request.title.as_deref(), MAX_TITLE_LEN)?;
        let description = validate_text(
            "description",
            request.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )?;

        let resolved = self.resolver().resolve_for_create(&request.identity()).await?;

        let priority = resolved
            .priority
            .ok_or(TicketError::MissingRequiredField("priority"))?;
        let category = resolved
            .category
            .ok_or(TicketError::MissingRequiredField("category"))?;
        let submitter = resolved
            .submitter
            .ok_or(TicketError::MissingRequiredField("submitterId"))?;

        let ticket = self
            .tickets
            .insert_ticket(NewTicket {
                title,
                description,
                priority_id: priority.id,
                category_id: category.id,
                submitter_id: submitter.id,
                assigned_agent_id: resolved.assigned_agent.map(|u| u.id),
                status: TicketStatus::New,
                created_at: now(),
            })
            .await?;

        metrics::counter!("tickets_created_total").increment(1);
        info!(
            ticket_id = ticket.id.value(),
            priority = %priority.name,
            category = %category.name,
            submitter_id = submitter.id,
            "Ticket created"
        );

        self.to_dto(ticket).await
    }

    async fn get(&self, id: TicketId) -> Result<TicketDto, TicketError> {
        let ticket = self.load(id).await?;
        self.to_dto(ticket).await
    }

    async fn list(&self) -> Result<Vec<TicketDto>, TicketError> {
        let tickets = self.tickets.list_tickets().await?;
        let mut dtos = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            dtos.push(self.to_dto(ticket).await?);
        }
        Ok(dtos)
    }

    async fn update(
        &self,
        id: TicketId,
        request: UpdateTicketRequest,
    ) -> Result<TicketDto, TicketError> {
        let mut ticket = self.load(id).await?;

        let title = request
            .title
            .as_deref()
            .map(|t| validate_text("title", Some(t), MAX_TITLE_LEN))
            .transpose()?;
        let description = request
            .description
            .as_deref()
            .map(|d| validate_text("description", Some(d), MAX_DESCRIPTION_LEN))
            .transpose()?;

        let resolved = self
            .resolver()
            .resolve_for_update(&ticket, &request.identity())
            .await?;

        if let Some(title) = title {
            ticket.title = title;
        }
        if let Some(description) = description {
            ticket.description = description;
        }
        if let Some(priority) = resolved.priority {
            ticket.priority_id = priority.id;
        }
        if let Some(category) = resolved.category {
            ticket.category_id = category.id;
        }
        if let Some(submitter) = resolved.submitter {
            ticket.submitter_id = Some(submitter.id);
        }
        if let Some(agent) = resolved.assigned_agent {
            ticket.assigned_agent_id = Some(agent.id);
        }
        ticket.updated_at = now();

        let saved = self.tickets.save_ticket(&ticket).await?;
        info!(ticket_id = id.value(), "Ticket updated");

        self.to_dto(saved).await
    }

    async fn update_status(
        &self,
        id: TicketId,
        request: UpdateStatusRequest,
    ) -> Result<TicketDto, TicketError> {
        let mut ticket = self.load(id).await?;

        let status = TicketStatus::canonicalize(request.status.as_deref()).inspect_err(|e| {
            warn!(ticket_id = id.value(), error = %e, "Rejected status change");
        })?;

        if let Some(user_id) = request.user_id {
            if self.references.find_user_by_id(user_id).await?.is_none() {
                return Err(TicketError::InvalidReference {
                    field: "userId",
                    message: format!("User with id {user_id} does not exist"),
                });
            }
        }

        let previous = ticket.status;
        apply_status(&mut ticket, status, request.comment.as_deref(), &now());

        let saved = match request.user_id {
            Some(user_id) => {
                let entry = NewHistoryEntry {
                    ticket_id: id,
                    user_id,
                    comment: request
                        .comment
                        .as_deref()
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string),
                    status_change_from: Some(previous.display_name().to_string()),
                    status_change_to: Some(status.display_name().to_string()),
                };
                self.tickets.save_status_change(&ticket, entry).await?
            }
            None => self.tickets.save_ticket(&ticket).await?,
        };

        metrics::counter!("ticket_status_changes_total", "to" => status.identifier())
            .increment(1);
        info!(
            ticket_id = id.value(),
            from = %previous,
            to = %status,
            "Ticket status changed"
        );

        self.to_dto(saved).await
    }

    async fn delete(&self, id: TicketId) -> Result<(), TicketError> {
        self.load(id).await?;

        if !self.tickets.delete_ticket(id).await? {
            return Err(TicketError::ticket_not_found(id));
        }

        info!(ticket_id = id.value(), "Ticket deleted");
        Ok(())
    }
}
