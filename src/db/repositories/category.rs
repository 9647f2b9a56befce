use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entities::{categories, prelude::*, recipe_categories};

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, name: &str) -> Result<categories::Model> {
        let model = categories::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
        };

        let category = model
            .insert(&self.conn)
            .await
            .context("Failed to insert category")?;

        info!("Created category '{}'", category.name);
        Ok(category)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<categories::Model>> {
        Categories::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query category by id")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<categories::Model>> {
        Categories::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query category by name")
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let count = Categories::find()
            .filter(categories::Column::Name.eq(name))
            .count(&self.conn)
            .await
            .context("Failed to count categories by name")?;

        Ok(count > 0)
    }

    pub async fn update_name(&self, id: &str, name: &str) -> Result<categories::Model> {
        let model = categories::ActiveModel {
            id: Set(id.to_string()),
            name: Set(name.to_string()),
        };

        model
            .update(&self.conn)
            .await
            .context("Failed to update category")
    }

    /// Removes the category and its recipe join rows.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let txn = self.conn.begin().await?;

        RecipeCategories::delete_many()
            .filter(recipe_categories::Column::CategoryId.eq(id))
            .exec(&txn)
            .await
            .context("Failed to delete recipe links for category")?;

        Categories::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete category")?;

        txn.commit().await?;

        info!("Deleted category {}", id);
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<categories::Model>> {
        Categories::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list categories")
    }
}
