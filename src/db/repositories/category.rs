use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;

use crate::domain::reference::fold_name;
use crate::entities::{prelude::*, categories};
use crate::models::Category;

/// Repository for the `categories` lookup table
pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: categories::Model) -> Category {
        Category {
            id: m.id,
            name: m.name,
            description: m.description,
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Category>> {
        let row = Categories::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query category by ID")?;

        Ok(row.map(Self::map_model))
    }

    /// Case-insensitive lookup on the trimmed name, folded with [`fold_name`]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let key = fold_name(name);
        let rows = Categories::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query category by name")?;

        Ok(rows
            .into_iter()
            .find(|row| fold_name(&row.name) == key)
            .map(Self::map_model))
    }

    pub async fn list_all(&self) -> Result<Vec<Category>> {
        let rows = Categories::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn names(&self) -> Result<Vec<String>> {
        Ok(self.list_all().await?.into_iter().map(|p| p.name).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Categories::find().count(&self.conn).await?)
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Category> {
        let active = categories::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert category")?;
        info!("Created category {} ({})", model.name, model.id);
        Ok(Self::map_model(model))
    }

    pub async fn update(&self, id: i32, name: &str, description: &str) -> Result<Option<Category>> {
        let Some(existing) = Categories::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: categories::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.description = Set(description.to_string());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update category")?;

        Ok(Some(Self::map_model(model)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Categories::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Inserts the given names, only when the table is still empty.
    pub async fn seed(&self, names: &[String]) -> Result<usize> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        for name in names {
            self.create(name, &format!("{name} related issues")).await?;
        }

        info!("Seeded {} categories", names.len());
        Ok(names.len())
    }
}
