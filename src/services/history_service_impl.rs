use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::api::types::{CreateHistoryRequest, HistoryDto, UpdateHistoryRequest};
use crate::domain::{TicketId, TicketStatus};
use crate::models::NewHistoryEntry;
use crate::services::history_service::{HistoryError, HistoryService};
use crate::services::stores::{HistoryStore, ReferenceStore, TicketStore};

pub struct DefaultHistoryService {
    references: Arc<dyn ReferenceStore>,
    tickets: Arc<dyn TicketStore>,
    history: Arc<dyn HistoryStore>,
}

impl DefaultHistoryService {
    #[must_use]
    pub fn new(
        references: Arc<dyn ReferenceStore>,
        tickets: Arc<dyn TicketStore>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            references,
            tickets,
            history,
        }
    }
}

/// Blank status fields are treated as absent.
fn canonical_display(raw: Option<&str>) -> Result<Option<String>, HistoryError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => Ok(Some(
            TicketStatus::canonicalize(Some(value))?
                .display_name()
                .to_string(),
        )),
        None => Ok(None),
    }
}

fn clean_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

#[async_trait]
impl HistoryService for DefaultHistoryService {
    async fn create(&self, request: CreateHistoryRequest) -> Result<HistoryDto, HistoryError> {
        let ticket_id = request
            .ticket_id
            .ok_or(HistoryError::MissingRequiredField("ticketId"))?;
        let user_id = request
            .user_id
            .ok_or(HistoryError::MissingRequiredField("userId"))?;

        if self
            .tickets
            .find_ticket(TicketId::new(ticket_id))
            .await?
            .is_none()
        {
            return Err(HistoryError::InvalidReference {
                field: "ticketId",
                message: format!("Ticket with id {ticket_id} does not exist"),
            });
        }
        if self.references.find_user_by_id(user_id).await?.is_none() {
            return Err(HistoryError::InvalidReference {
                field: "userId",
                message: format!("User with id {user_id} does not exist"),
            });
        }

        let status_change_from = canonical_display(request.status_change_from.as_deref())?;
        let status_change_to = canonical_display(request.status_change_to.as_deref())?;

        let entry = self
            .history
            .insert_history(NewHistoryEntry {
                ticket_id: TicketId::new(ticket_id),
                user_id,
                comment: clean_comment(request.comment),
                status_change_from,
                status_change_to,
            })
            .await?;

        info!(history_id = entry.id, ticket_id, user_id, "History entry recorded");
        Ok(entry.into())
    }

    async fn get(&self, id: i32) -> Result<HistoryDto, HistoryError> {
        self.history
            .find_history(id)
            .await?
            .map(HistoryDto::from)
            .ok_or(HistoryError::NotFound {
                resource: "History entry",
                id,
            })
    }

    async fn list(&self) -> Result<Vec<HistoryDto>, HistoryError> {
        let entries = self.history.list_history().await?;
        Ok(entries.into_iter().map(HistoryDto::from).collect())
    }

    async fn list_for_ticket(&self, ticket_id: TicketId) -> Result<Vec<HistoryDto>, HistoryError> {
        if self.tickets.find_ticket(ticket_id).await?.is_none() {
            return Err(HistoryError::NotFound {
                resource: "Ticket",
                id: ticket_id.value(),
            });
        }

        let entries = self.history.list_history_for_ticket(ticket_id).await?;
        Ok(entries.into_iter().map(HistoryDto::from).collect())
    }

    async fn update_comment(
        &self,
        id: i32,
        request: UpdateHistoryRequest,
    ) -> Result<HistoryDto, HistoryError> {
        let entry = self
            .history
            .update_history_comment(id, clean_comment(request.comment))
            .await?
            .ok_or(HistoryError::NotFound {
                resource: "History entry",
                id,
            })?;

        info!(history_id = id, "History comment edited");
        Ok(entry.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTicket;
    use crate::services::identity_resolver::tests::FakeReferences;
    use crate::services::ticket_service_impl::tests::FakeTickets;

    async fn setup() -> (DefaultHistoryService, Arc<FakeTickets>) {
        let store = Arc::new(FakeTickets::default());
        store
            .insert_ticket(NewTicket {
                title: "VPN drops".to_string(),
                description: "Every hour".to_string(),
                priority_id: 1,
                category_id: 1,
                submitter_id: 1,
                assigned_agent_id: None,
                status: TicketStatus::New,
                created_at: "2026-01-01T00:00:00+00:00".to_string(),
            })
            .await
            .unwrap();

        let service = DefaultHistoryService::new(
            Arc::new(FakeReferences::seeded()),
            store.clone(),
            store.clone(),
        );
        (service, store)
    }

    #[tokio::test]
    async fn create_canonicalizes_statuses() {
        let (service, _) = setup().await;

        let dto = service
            .create(CreateHistoryRequest {
                ticket_id: Some(1),
                user_id: Some(2),
                comment: Some("picked up".to_string()),
                status_change_from: Some("open".to_string()),
                status_change_to: Some("in_progress".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(dto.status_change_from.as_deref(), Some("New"));
        assert_eq!(dto.status_change_to.as_deref(), Some("In Progress"));
        assert!(!dto.timestamp.is_empty());
    }

    #[tokio::test]
    async fn create_checks_references() {
        let (service, store) = setup().await;

        let err = service
            .create(CreateHistoryRequest {
                ticket_id: Some(9),
                user_id: Some(2),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HistoryError::InvalidReference {
                field: "ticketId",
                ..
            }
        ));

        let err = service
            .create(CreateHistoryRequest {
                ticket_id: Some(1),
                user_id: Some(99),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HistoryError::InvalidReference { field: "userId", .. }
        ));

        let err = service
            .create(CreateHistoryRequest {
                ticket_id: Some(1),
                user_id: Some(2),
                status_change_to: Some("halfway".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::InvalidStatus(_)));

        assert!(store.history.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_comment_is_editable() {
        let (service, _) = setup().await;
        let created = service
            .create(CreateHistoryRequest {
                ticket_id: Some(1),
                user_id: Some(2),
                comment: Some("first".to_string()),
                status_change_to: Some("Resolved".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let edited = service
            .update_comment(
                created.id,
                UpdateHistoryRequest {
                    comment: Some("second".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.comment.as_deref(), Some("second"));
        assert_eq!(edited.status_change_to.as_deref(), Some("Resolved"));
        assert_eq!(edited.timestamp, created.timestamp);

        let err = service
            .update_comment(77, UpdateHistoryRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::NotFound { id: 77, .. }));
    }

    #[tokio::test]
    async fn list_for_missing_ticket_is_not_found() {
        let (service, _) = setup().await;
        let err = service
            .list_for_ticket(TicketId::new(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HistoryError::NotFound {
                resource: "Ticket",
                ..
            }
        ));
    }
}
