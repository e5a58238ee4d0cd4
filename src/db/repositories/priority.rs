use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;

use crate::domain::reference::fold_name;
use crate::entities::{prelude::*, priorities};
use crate::models::Priority;

/// Repository for the `priorities` lookup table
pub struct PriorityRepository {
    conn: DatabaseConnection,
}

impl PriorityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: priorities::Model) -> Priority {
        Priority {
            id: m.id,
            name: m.name,
            description: m.description,
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Priority>> {
        let row = Priorities::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query priority by ID")?;

        Ok(row.map(Self::map_model))
    }

    /// Case-insensitive lookup on the trimmed name, folded with [`fold_name`]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Priority>> {
        let key = fold_name(name);
        let rows = Priorities::find()
            .order_by_asc(priorities::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query priority by name")?;

        Ok(rows
            .into_iter()
            .find(|row| fold_name(&row.name) == key)
            .map(Self::map_model))
    }

    pub async fn list_all(&self) -> Result<Vec<Priority>> {
        let rows = Priorities::find()
            .order_by_asc(priorities::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn names(&self) -> Result<Vec<String>> {
        Ok(self.list_all().await?.into_iter().map(|p| p.name).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Priorities::find().count(&self.conn).await?)
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Priority> {
        let active = priorities::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert priority")?;
        info!("Created priority {} ({})", model.name, model.id);
        Ok(Self::map_model(model))
    }

    pub async fn update(&self, id: i32, name: &str, description: &str) -> Result<Option<Priority>> {
        let Some(existing) = Priorities::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: priorities::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.description = Set(description.to_string());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update priority")?;

        Ok(Some(Self::map_model(model)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Priorities::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Inserts the given names, only when the table is still empty.
    pub async fn seed(&self, names: &[String]) -> Result<usize> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        for name in names {
            self.create(name, &format!("{name} priority")).await?;
        }

        info!("Seeded {} priorities", names.len());
        Ok(names.len())
    }
}
