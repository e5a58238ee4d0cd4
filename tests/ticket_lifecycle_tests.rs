use helpdesk::api::types::{
    CreateTicketRequest, CreateUserRequest, LookupRequest, UpdateStatusRequest,
    UpdateTicketRequest,
};
use helpdesk::config::Config;
use helpdesk::domain::{LookupKind, TicketId, TicketStatus};
use helpdesk::models::NewHistoryEntry;
use helpdesk::services::{ReferenceError, TicketError, UserError};
use helpdesk::state::SharedState;

async fn setup() -> SharedState {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = SharedState::new(config)
        .await
        .expect("Failed to build shared state");

    for (email, role) in [("ada@example.com", "employee"), ("bob@example.com", "agent")] {
        state
            .user_service
            .create(CreateUserRequest {
                email: Some(email.to_string()),
                password: Some("correct horse".to_string()),
                role: Some(role.to_string()),
                name: Some(email.split('@').next().unwrap_or_default().to_string()),
                phone_number: None,
            })
            .await
            .expect("Failed to create user");
    }

    state
}

fn laptop_request() -> CreateTicketRequest {
    CreateTicketRequest {
        title: Some("Laptop will not boot".to_string()),
        description: Some("Black screen after the update".to_string()),
        priority: Some("  high  ".to_string()),
        category: Some("hardware".to_string()),
        submitter_id: Some(1),
        ..Default::default()
    }
}

fn status(value: &str, user_id: Option<i32>) -> UpdateStatusRequest {
    UpdateStatusRequest {
        status: Some(value.to_string()),
        comment: Some(format!("moved to {value}")),
        user_id,
    }
}

#[tokio::test]
async fn test_seeded_lookups_resolve_by_name() {
    let state = setup().await;

    let ticket = state.ticket_service.create(laptop_request()).await.unwrap();

    assert_eq!(ticket.priority.name, "HIGH");
    assert_eq!(ticket.category.name, "HARDWARE");
    assert_eq!(ticket.status, TicketStatus::New);
    assert_eq!(ticket.submitter.map(|u| u.id), Some(1));
    assert!(ticket.resolved_at.is_none());
}

#[tokio::test]
async fn test_status_changes_write_history_newest_first() {
    let state = setup().await;
    let id = TicketId::new(state.ticket_service.create(laptop_request()).await.unwrap().id);

    state
        .ticket_service
        .update_status(id, status("in progress", Some(2)))
        .await
        .unwrap();
    let resolved = state
        .ticket_service
        .update_status(id, status("RESOLVED", Some(2)))
        .await
        .unwrap();

    assert_eq!(resolved.status, TicketStatus::Resolved);
    assert!(resolved.resolved_at.is_some());
    assert_eq!(resolved.comment.as_deref(), Some("moved to RESOLVED"));

    let history = state.history_service.list_for_ticket(id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].status_change_from.as_deref(), Some("In Progress"));
    assert_eq!(history[0].status_change_to.as_deref(), Some("Resolved"));
    assert_eq!(history[1].status_change_from.as_deref(), Some("New"));
    assert_eq!(history[1].status_change_to.as_deref(), Some("In Progress"));
}

#[tokio::test]
async fn test_reopening_clears_resolution() {
    let state = setup().await;
    let id = TicketId::new(state.ticket_service.create(laptop_request()).await.unwrap().id);

    let closed = state
        .ticket_service
        .update_status(id, status("closed", None))
        .await
        .unwrap();
    assert!(closed.resolved_at.is_some());

    let reopened = state
        .ticket_service
        .update_status(id, status("open", None))
        .await
        .unwrap();
    assert_eq!(reopened.status, TicketStatus::New);
    assert!(reopened.resolved_at.is_none());

    let history = state.history_service.list_for_ticket(id).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_unknown_acting_user_changes_nothing() {
    let state = setup().await;
    let id = TicketId::new(state.ticket_service.create(laptop_request()).await.unwrap().id);

    let err = state
        .ticket_service
        .update_status(id, status("Resolved", Some(99)))
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("userId"));

    let ticket = state.ticket_service.get(id).await.unwrap();
    assert_eq!(ticket.status, TicketStatus::New);
    assert!(state.history_service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_reassigns_agent_and_priority() {
    let state = setup().await;
    let id = TicketId::new(state.ticket_service.create(laptop_request()).await.unwrap().id);

    let updated = state
        .ticket_service
        .update(
            id,
            UpdateTicketRequest {
                priority_id: Some(1),
                assigned_agent_id: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.priority.name, "LOW");
    assert_eq!(updated.category.name, "HARDWARE");
    assert_eq!(updated.title, "Laptop will not boot");
    assert_eq!(updated.assigned_agent.map(|u| u.id), Some(2));

    let err = state
        .ticket_service
        .update(
            id,
            UpdateTicketRequest {
                category: Some("plumbing".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TicketError::InvalidReference { field: "category", .. }));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let state = setup().await;
    let id = TicketId::new(state.ticket_service.create(laptop_request()).await.unwrap().id);

    state.ticket_service.delete(id).await.unwrap();

    assert!(matches!(
        state.ticket_service.get(id).await,
        Err(TicketError::NotFound { .. })
    ));
    assert!(matches!(
        state.ticket_service.delete(id).await,
        Err(TicketError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_non_ascii_names_fold_case() {
    let state = setup().await;
    let eleve = state
        .reference_service
        .create(
            LookupKind::Priority,
            LookupRequest {
                name: Some("ÉLEVÉ".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();

    let err = state
        .reference_service
        .create(
            LookupKind::Priority,
            LookupRequest {
                name: Some("élevé".to_string()),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ReferenceError::Conflict { .. }));

    for spelling in ["ÉLEVÉ", " élevé "] {
        let ticket = state
            .ticket_service
            .create(CreateTicketRequest {
                priority: Some(spelling.to_string()),
                ..laptop_request()
            })
            .await
            .unwrap();
        assert_eq!(ticket.priority.id, eleve.id);
    }
}

#[tokio::test]
async fn test_non_ascii_emails_fold_case() {
    let state = setup().await;
    let user = |email: &str| CreateUserRequest {
        email: Some(email.to_string()),
        password: Some("correct horse".to_string()),
        name: Some("Émile".to_string()),
        ..Default::default()
    };

    state
        .user_service
        .create(user("ÉMILE@example.com"))
        .await
        .unwrap();
    let err = state
        .user_service
        .create(user("émile@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, UserError::Conflict(_)));
}

#[tokio::test]
async fn test_status_change_rolls_back_when_history_fails() {
    let state = setup().await;
    let id = TicketId::new(state.ticket_service.create(laptop_request()).await.unwrap().id);

    let mut ticket = state.store.get_ticket(id).await.unwrap().unwrap();
    ticket.status = TicketStatus::Closed;
    ticket.resolved_at = Some(ticket.updated_at.clone());

    // No user 999, so the history insert violates its foreign key.
    let result = state
        .store
        .save_status_change(
            &ticket,
            NewHistoryEntry {
                ticket_id: id,
                user_id: 999,
                comment: None,
                status_change_from: Some("New".to_string()),
                status_change_to: Some("Closed".to_string()),
            },
        )
        .await;
    assert!(result.is_err());

    let stored = state.ticket_service.get(id).await.unwrap();
    assert_eq!(stored.status, TicketStatus::New);
    assert!(stored.resolved_at.is_none());
    assert!(state.history_service.list().await.unwrap().is_empty());
}
