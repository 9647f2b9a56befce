use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::entities::{ingredients, prelude::*};

pub struct IngredientRepository {
    conn: DatabaseConnection,
}

impl IngredientRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, name: &str) -> Result<ingredients::Model> {
        let model = ingredients::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
        };

        let ingredient = model
            .insert(&self.conn)
            .await
            .context("Failed to insert ingredient")?;

        info!("Created ingredient '{}'", ingredient.name);
        Ok(ingredient)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<ingredients::Model>> {
        Ingredients::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query ingredient by id")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<ingredients::Model>> {
        Ingredients::find()
            .filter(ingredients::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query ingredient by name")
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let count = Ingredients::find()
            .filter(ingredients::Column::Name.eq(name))
            .count(&self.conn)
            .await
            .context("Failed to count ingredients by name")?;

        Ok(count > 0)
    }

    pub async fn list_all(&self) -> Result<Vec<ingredients::Model>> {
        Ingredients::find()
            .order_by_asc(ingredients::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list ingredients")
    }
}
