//! `SeaORM` implementation of the `ReferenceService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::types::{LookupDto, LookupRequest, StatusOptionDto};
use crate::db::Store;
use crate::domain::{LookupKind, TicketStatus};
use crate::services::reference_service::{ReferenceError, ReferenceService};

const MAX_NAME_LEN: usize = 50;

pub struct SeaOrmReferenceService {
    store: Store,
}

impl SeaOrmReferenceService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Fails with `Conflict` when another row already uses the name.
    async fn ensure_unique(
        &self,
        kind: LookupKind,
        name: &str,
        except: Option<i32>,
    ) -> Result<(), ReferenceError> {
        match self.store.find_lookup_by_name(kind, name).await? {
            Some(existing) if Some(existing.id) != except => Err(ReferenceError::Conflict {
                kind,
                name: existing.name,
            }),
            _ => Ok(()),
        }
    }
}

fn validate(request: LookupRequest) -> Result<(String, String), ReferenceError> {
    let name = request.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(ReferenceError::Validation("name must not be blank".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ReferenceError::Validation(format!(
            "name must be {MAX_NAME_LEN} characters or less"
        )));
    }

    let description = request
        .description
        .map(|d| d.trim().to_string())
        .unwrap_or_default();

    Ok((name.to_string(), description))
}

#[async_trait]
impl ReferenceService for SeaOrmReferenceService {
    async fn list(&self, kind: LookupKind) -> Result<Vec<LookupDto>, ReferenceError> {
        let rows = self.store.list_lookups(kind).await?;
        Ok(rows.into_iter().map(LookupDto::from).collect())
    }

    async fn get(&self, kind: LookupKind, id: i32) -> Result<LookupDto, ReferenceError> {
        self.store
            .get_lookup(kind, id)
            .await?
            .map(LookupDto::from)
            .ok_or(ReferenceError::NotFound { kind, id })
    }

    async fn create(
        &self,
        kind: LookupKind,
        request: LookupRequest,
    ) -> Result<LookupDto, ReferenceError> {
        let (name, description) = validate(request)?;
        self.ensure_unique(kind, &name, None).await?;

        let entry = self.store.create_lookup(kind, &name, &description).await?;
        info!(kind = %kind, id = entry.id, name = %entry.name, "Reference row created");
        Ok(entry.into())
    }

    async fn update(
        &self,
        kind: LookupKind,
        id: i32,
        request: LookupRequest,
    ) -> Result<LookupDto, ReferenceError> {
        let (name, description) = validate(request)?;
        self.ensure_unique(kind, &name, Some(id)).await?;

        let entry = self
            .store
            .update_lookup(kind, id, &name, &description)
            .await?
            .ok_or(ReferenceError::NotFound { kind, id })?;

        info!(kind = %kind, id, name = %entry.name, "Reference row updated");
        Ok(entry.into())
    }

    async fn delete(&self, kind: LookupKind, id: i32) -> Result<(), ReferenceError> {
        if self.store.get_lookup(kind, id).await?.is_none() {
            return Err(ReferenceError::NotFound { kind, id });
        }

        let count = self.store.lookup_usage(kind, id).await?;
        if count > 0 {
            warn!(kind = %kind, id, count, "Refusing to delete referenced row");
            return Err(ReferenceError::InUse { kind, id, count });
        }

        self.store.delete_lookup(kind, id).await?;
        info!(kind = %kind, id, "Reference row deleted");
        Ok(())
    }

    fn statuses(&self) -> Vec<StatusOptionDto> {
        TicketStatus::ALL.into_iter().map(StatusOptionDto::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, description: Option<&str>) -> LookupRequest {
        LookupRequest {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn validate_trims_fields() {
        let (name, description) = validate(request(Some("  Urgent "), Some(" now "))).unwrap();
        assert_eq!(name, "Urgent");
        assert_eq!(description, "now");

        let (_, description) = validate(request(Some("Urgent"), None)).unwrap();
        assert_eq!(description, "");
    }

    #[test]
    fn validate_rejects_blank_and_long_names() {
        assert!(matches!(
            validate(request(None, None)),
            Err(ReferenceError::Validation(_))
        ));
        assert!(matches!(
            validate(request(Some("   "), None)),
            Err(ReferenceError::Validation(_))
        ));
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            validate(request(Some(&long), None)),
            Err(ReferenceError::Validation(_))
        ));
    }
}
