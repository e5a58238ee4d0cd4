use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::domain::{TicketId, TicketStatus};
use crate::entities::{prelude::*, tickets};
use crate::models::{NewTicket, Ticket};

/// Repository for ticket rows
pub struct TicketRepository {
    conn: DatabaseConnection,
}

impl TicketRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: tickets::Model) -> Result<Ticket> {
        let status = TicketStatus::from_display(&m.status).ok_or_else(|| {
            anyhow::anyhow!("Ticket {} has unknown stored status '{}'", m.id, m.status)
        })?;

        Ok(Ticket {
            id: TicketId::new(m.id),
            title: m.title,
            description: m.description,
            priority_id: m.priority_id,
            category_id: m.category_id,
            submitter_id: m.submitter_id,
            assigned_agent_id: m.assigned_agent_id,
            status,
            comment: m.comment,
            created_at: m.created_at,
            updated_at: m.updated_at,
            resolved_at: m.resolved_at,
        })
    }

    pub async fn insert(&self, ticket: NewTicket) -> Result<Ticket> {
        let active = tickets::ActiveModel {
            title: Set(ticket.title),
            description: Set(ticket.description),
            priority_id: Set(ticket.priority_id),
            category_id: Set(ticket.category_id),
            submitter_id: Set(Some(ticket.submitter_id)),
            assigned_agent_id: Set(ticket.assigned_agent_id),
            status: Set(ticket.status.display_name().to_string()),
            comment: Set(None),
            updated_at: Set(ticket.created_at.clone()),
            created_at: Set(ticket.created_at),
            resolved_at: Set(None),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert ticket")?;
        info!("Stored ticket {}", model.id);

        Self::map_model(model)
    }

    pub async fn update(&self, ticket: &Ticket) -> Result<Ticket> {
        Self::update_in(&self.conn, ticket).await
    }

    /// Writes every mutable column of an existing ticket on `conn`, which may
    /// be a transaction. `created_at` is never rewritten.
    pub async fn update_in<C: ConnectionTrait>(conn: &C, ticket: &Ticket) -> Result<Ticket> {
        let active = tickets::ActiveModel {
            id: Unchanged(ticket.id.value()),
            title: Set(ticket.title.clone()),
            description: Set(ticket.description.clone()),
            priority_id: Set(ticket.priority_id),
            category_id: Set(ticket.category_id),
            submitter_id: Set(ticket.submitter_id),
            assigned_agent_id: Set(ticket.assigned_agent_id),
            status: Set(ticket.status.display_name().to_string()),
            comment: Set(ticket.comment.clone()),
            created_at: Unchanged(ticket.created_at.clone()),
            updated_at: Set(ticket.updated_at.clone()),
            resolved_at: Set(ticket.resolved_at.clone()),
        };

        let model = active
            .update(conn)
            .await
            .with_context(|| format!("Failed to update ticket {}", ticket.id))?;

        Self::map_model(model)
    }

    pub async fn get(&self, id: TicketId) -> Result<Option<Ticket>> {
        Tickets::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query ticket")?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn list_all(&self) -> Result<Vec<Ticket>> {
        let rows = Tickets::find()
            .order_by_asc(tickets::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list tickets")?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn delete(&self, id: TicketId) -> Result<bool> {
        let result = Tickets::delete_by_id(id.value())
            .exec(&self.conn)
            .await
            .context("Failed to delete ticket")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_with_priority(&self, priority_id: i32) -> Result<u64> {
        Ok(Tickets::find()
            .filter(tickets::Column::PriorityId.eq(priority_id))
            .count(&self.conn)
            .await?)
    }

    pub async fn count_with_category(&self, category_id: i32) -> Result<u64> {
        Ok(Tickets::find()
            .filter(tickets::Column::CategoryId.eq(category_id))
            .count(&self.conn)
            .await?)
    }

    pub async fn count_submitted_by(&self, user_id: i32) -> Result<u64> {
        Ok(Tickets::find()
            .filter(tickets::Column::SubmitterId.eq(user_id))
            .count(&self.conn)
            .await?)
    }
}
