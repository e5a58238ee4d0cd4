//! Resolves the reference fields of a ticket request against the reference
//! tables.
//!
//! The resolver performs no writes. It either returns every referenced row or
//! the first field that failed, checked in the order priority, category,
//! submitter, assigned agent.

use tracing::debug;

use crate::domain::reference::allowed_names;
use crate::domain::{LookupKind, Reference};
use crate::models::{LookupEntry, Ticket, User};
use crate::services::stores::ReferenceStore;
use crate::services::ticket_service::TicketError;

const SUBMITTER_FIELD: &str = "submitterId";
const AGENT_FIELD: &str = "assignedAgentId";

/// Reference fields as supplied by a create or update request.
#[derive(Debug, Clone, Default)]
pub struct IdentityRequest {
    pub priority: Reference,
    pub category: Reference,
    pub submitter_id: Option<i32>,
    pub assigned_agent_id: Option<i32>,
}

/// Result of a successful resolution. `None` means the request did not
/// touch the field.
#[derive(Debug, Clone, Default)]
pub struct ResolvedIdentity {
    pub priority: Option<LookupEntry>,
    pub category: Option<LookupEntry>,
    pub submitter: Option<User>,
    pub assigned_agent: Option<User>,
}

pub struct IdentityResolver<'a> {
    store: &'a dyn ReferenceStore,
}

impl<'a> IdentityResolver<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn ReferenceStore) -> Self {
        Self { store }
    }

    /// Resolution for a new ticket. A submitter is mandatory; priority and
    /// category may come back absent and are checked by the caller.
    pub async fn resolve_for_create(
        &self,
        request: &IdentityRequest,
    ) -> Result<ResolvedIdentity, TicketError> {
        let priority = self
            .resolve_lookup(LookupKind::Priority, &request.priority)
            .await?;
        let category = self
            .resolve_lookup(LookupKind::Category, &request.category)
            .await?;

        let submitter_id = request
            .submitter_id
            .ok_or(TicketError::MissingRequiredField(SUBMITTER_FIELD))?;
        let submitter = self.resolve_user(SUBMITTER_FIELD, submitter_id).await?;

        let assigned_agent = match request.assigned_agent_id {
            Some(id) => Some(self.resolve_user(AGENT_FIELD, id).await?),
            None => None,
        };

        Ok(ResolvedIdentity {
            priority,
            category,
            submitter: Some(submitter),
            assigned_agent,
        })
    }

    /// Resolution for an existing ticket. Fields absent from the request stay
    /// `None` so the caller keeps the stored value; an absent submitter is
    /// only accepted when the ticket already has one.
    pub async fn resolve_for_update(
        &self,
        existing: &Ticket,
        request: &IdentityRequest,
    ) -> Result<ResolvedIdentity, TicketError> {
        let priority = self
            .resolve_lookup(LookupKind::Priority, &request.priority)
            .await?;
        let category = self
            .resolve_lookup(LookupKind::Category, &request.category)
            .await?;

        let submitter = match request.submitter_id {
            Some(id) => Some(self.resolve_user(SUBMITTER_FIELD, id).await?),
            None if existing.submitter_id.is_some() => None,
            None => return Err(TicketError::MissingRequiredField(SUBMITTER_FIELD)),
        };

        let assigned_agent = match request.assigned_agent_id {
            Some(id) => Some(self.resolve_user(AGENT_FIELD, id).await?),
            None => None,
        };

        Ok(ResolvedIdentity {
            priority,
            category,
            submitter,
            assigned_agent,
        })
    }

    /// Shared routine for both lookup tables. IDs are matched exactly, names
    /// case-insensitively after trimming.
    pub async fn resolve_lookup(
        &self,
        kind: LookupKind,
        reference: &Reference,
    ) -> Result<Option<LookupEntry>, TicketError> {
        match reference {
            Reference::Absent => Ok(None),
            Reference::ById(id) => {
                let entry = self.store.find_lookup_by_id(kind, *id).await?;
                entry.map(Some).ok_or_else(|| TicketError::InvalidReference {
                    field: kind.id_field(),
                    message: format!("{kind} with id {id} does not exist"),
                })
            }
            Reference::ByName(name) => {
                let name = name.trim();
                if let Some(entry) = self.store.find_lookup_by_name(kind, name).await? {
                    debug!(kind = %kind, lookup = name, id = entry.id, "Resolved reference by name");
                    return Ok(Some(entry));
                }

                let names = self.store.lookup_names(kind).await?;
                Err(TicketError::InvalidReference {
                    field: kind.name_field(),
                    message: format!(
                        "Unknown {} '{name}'. Allowed: {}",
                        kind.name_field(),
                        allowed_names(names)
                    ),
                })
            }
        }
    }

    async fn resolve_user(&self, field: &'static str, id: i32) -> Result<User, TicketError> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| TicketError::InvalidReference {
                field,
                message: format!("User with id {id} does not exist"),
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::reference::fold_name;
    use crate::domain::{Role, TicketId, TicketStatus};
    use anyhow::Result;

    /// Reference tables held in plain vectors.
    #[derive(Default)]
    pub(crate) struct FakeReferences {
        pub priorities: Vec<LookupEntry>,
        pub categories: Vec<LookupEntry>,
        pub users: Vec<User>,
    }

    impl FakeReferences {
        pub(crate) fn seeded() -> Self {
            let lookup = |id: i32, name: &str| LookupEntry {
                id,
                name: name.to_string(),
                description: String::new(),
            };
            Self {
                priorities: vec![lookup(1, "Low"), lookup(2, "Medium"), lookup(3, "High")],
                categories: vec![lookup(1, "Software"), lookup(2, "hardware")],
                users: (1..=7).map(user).collect(),
            }
        }

        fn table(&self, kind: LookupKind) -> &[LookupEntry] {
            match kind {
                LookupKind::Priority => &self.priorities,
                LookupKind::Category => &self.categories,
            }
        }
    }

    pub(crate) fn user(id: i32) -> User {
        User {
            id,
            email: format!("user{id}@example.com"),
            role: Role::Employee,
            name: format!("User {id}"),
            phone_number: None,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[async_trait::async_trait]
    impl ReferenceStore for FakeReferences {
        async fn find_lookup_by_id(
            &self,
            kind: LookupKind,
            id: i32,
        ) -> Result<Option<LookupEntry>> {
            Ok(self.table(kind).iter().find(|e| e.id == id).cloned())
        }

        async fn find_lookup_by_name(
            &self,
            kind: LookupKind,
            name: &str,
        ) -> Result<Option<LookupEntry>> {
            let key = fold_name(name);
            Ok(self
                .table(kind)
                .iter()
                .find(|e| fold_name(&e.name) == key)
                .cloned())
        }

        async fn lookup_names(&self, kind: LookupKind) -> Result<Vec<String>> {
            Ok(self.table(kind).iter().map(|e| e.name.clone()).collect())
        }

        async fn find_user_by_id(&self, id: i32) -> Result<Option<User>> {
            Ok(self.users.iter().find(|u| u.id == id).cloned())
        }
    }

    fn ticket_without_submitter() -> Ticket {
        Ticket {
            id: TicketId::new(1),
            title: "t".to_string(),
            description: "d".to_string(),
            priority_id: 1,
            category_id: 1,
            submitter_id: None,
            assigned_agent_id: None,
            status: TicketStatus::New,
            comment: None,
            created_at: String::new(),
            updated_at: String::new(),
            resolved_at: None,
        }
    }

    #[tokio::test]
    async fn missing_priority_id_is_invalid_reference() {
        let store = FakeReferences::seeded();
        let resolver = IdentityResolver::new(&store);

        let err = resolver
            .resolve_lookup(LookupKind::Priority, &Reference::ById(5))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TicketError::InvalidReference {
                field: "priorityId",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn name_lookup_ignores_case_and_whitespace() {
        let store = FakeReferences::seeded();
        let resolver = IdentityResolver::new(&store);

        let reference = Reference::from_parts(None, Some("  high  "));
        let entry = resolver
            .resolve_lookup(LookupKind::Priority, &reference)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(entry.id, 3);
        assert_eq!(entry.name, "High");
    }

    #[tokio::test]
    async fn id_wins_over_name() {
        let store = FakeReferences::seeded();
        let resolver = IdentityResolver::new(&store);

        let reference = Reference::from_parts(Some(1), Some("High"));
        let entry = resolver
            .resolve_lookup(LookupKind::Priority, &reference)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(entry.name, "Low");
    }

    #[tokio::test]
    async fn unknown_name_lists_allowed_values() {
        let store = FakeReferences::seeded();
        let resolver = IdentityResolver::new(&store);

        let err = resolver
            .resolve_lookup(LookupKind::Category, &Reference::ByName("Plumbing".into()))
            .await
            .unwrap_err();

        match err {
            TicketError::InvalidReference { field, message } => {
                assert_eq!(field, "category");
                assert!(message.contains("Plumbing"));
                assert!(message.ends_with("Allowed: hardware, Software"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_name_with_empty_table() {
        let store = FakeReferences::default();
        let resolver = IdentityResolver::new(&store);

        let err = resolver
            .resolve_lookup(LookupKind::Priority, &Reference::ByName("High".into()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("none configured"));
    }

    #[tokio::test]
    async fn create_requires_submitter() {
        let store = FakeReferences::seeded();
        let resolver = IdentityResolver::new(&store);
        let request = IdentityRequest {
            priority: Reference::ById(1),
            category: Reference::ById(1),
            ..Default::default()
        };

        let err = resolver.resolve_for_create(&request).await.unwrap_err();
        assert!(matches!(
            err,
            TicketError::MissingRequiredField("submitterId")
        ));
    }

    #[tokio::test]
    async fn create_rejects_unknown_users() {
        let store = FakeReferences::seeded();
        let resolver = IdentityResolver::new(&store);

        let request = IdentityRequest {
            submitter_id: Some(99),
            ..Default::default()
        };
        let err = resolver.resolve_for_create(&request).await.unwrap_err();
        assert_eq!(err.field(), Some("submitterId"));

        let request = IdentityRequest {
            submitter_id: Some(7),
            assigned_agent_id: Some(42),
            ..Default::default()
        };
        let err = resolver.resolve_for_create(&request).await.unwrap_err();
        assert_eq!(err.field(), Some("assignedAgentId"));
    }

    #[tokio::test]
    async fn create_resolves_every_field() {
        let store = FakeReferences::seeded();
        let resolver = IdentityResolver::new(&store);
        let request = IdentityRequest {
            priority: Reference::ById(2),
            category: Reference::ByName("software".into()),
            submitter_id: Some(7),
            assigned_agent_id: Some(3),
        };

        let resolved = resolver.resolve_for_create(&request).await.unwrap();
        assert_eq!(resolved.priority.map(|p| p.id), Some(2));
        assert_eq!(resolved.category.map(|c| c.id), Some(1));
        assert_eq!(resolved.submitter.map(|u| u.id), Some(7));
        assert_eq!(resolved.assigned_agent.map(|u| u.id), Some(3));
    }

    #[tokio::test]
    async fn update_keeps_absent_fields() {
        let store = FakeReferences::seeded();
        let resolver = IdentityResolver::new(&store);
        let mut existing = ticket_without_submitter();
        existing.submitter_id = Some(4);

        let resolved = resolver
            .resolve_for_update(&existing, &IdentityRequest::default())
            .await
            .unwrap();

        assert!(resolved.priority.is_none());
        assert!(resolved.category.is_none());
        assert!(resolved.submitter.is_none());
        assert!(resolved.assigned_agent.is_none());
    }

    #[tokio::test]
    async fn update_without_any_submitter_fails() {
        let store = FakeReferences::seeded();
        let resolver = IdentityResolver::new(&store);

        let err = resolver
            .resolve_for_update(&ticket_without_submitter(), &IdentityRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TicketError::MissingRequiredField("submitterId")
        ));
    }
}
