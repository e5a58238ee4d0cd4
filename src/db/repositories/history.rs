use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::TicketId;
use crate::entities::{prelude::*, ticket_history};
use crate::models::{HistoryEntry, NewHistoryEntry};

/// Repository for the append-only `ticket_history` table
pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: ticket_history::Model) -> HistoryEntry {
        HistoryEntry {
            id: m.id,
            ticket_id: TicketId::new(m.ticket_id),
            user_id: m.user_id,
            comment: m.comment,
            status_change_from: m.status_change_from,
            status_change_to: m.status_change_to,
            timestamp: m.timestamp,
        }
    }

    pub async fn insert(&self, entry: NewHistoryEntry) -> Result<HistoryEntry> {
        Self::insert_in(&self.conn, entry).await
    }

    pub async fn insert_in<C: ConnectionTrait>(
        conn: &C,
        entry: NewHistoryEntry,
    ) -> Result<HistoryEntry> {
        let active = ticket_history::ActiveModel {
            ticket_id: Set(entry.ticket_id.value()),
            user_id: Set(entry.user_id),
            comment: Set(entry.comment),
            status_change_from: Set(entry.status_change_from),
            status_change_to: Set(entry.status_change_to),
            timestamp: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(conn)
            .await
            .context("Failed to insert ticket history")?;

        Ok(Self::map_model(model))
    }

    pub async fn get(&self, id: i32) -> Result<Option<HistoryEntry>> {
        let row = TicketHistory::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query ticket history")?;

        Ok(row.map(Self::map_model))
    }

    pub async fn list_all(&self) -> Result<Vec<HistoryEntry>> {
        let rows = TicketHistory::find()
            .order_by_asc(ticket_history::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Newest first
    pub async fn list_for_ticket(&self, ticket_id: TicketId) -> Result<Vec<HistoryEntry>> {
        let rows = TicketHistory::find()
            .filter(ticket_history::Column::TicketId.eq(ticket_id.value()))
            .order_by_desc(ticket_history::Column::Timestamp)
            .order_by_desc(ticket_history::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Only the comment of an entry may change after it is written.
    pub async fn update_comment(
        &self,
        id: i32,
        comment: Option<String>,
    ) -> Result<Option<HistoryEntry>> {
        let Some(existing) = TicketHistory::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: ticket_history::ActiveModel = existing.into();
        active.comment = Set(comment);
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update ticket history comment")?;

        Ok(Some(Self::map_model(model)))
    }

    pub async fn count_by_user(&self, user_id: i32) -> Result<u64> {
        Ok(TicketHistory::find()
            .filter(ticket_history::Column::UserId.eq(user_id))
            .count(&self.conn)
            .await?)
    }
}
