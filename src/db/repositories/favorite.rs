use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;

use crate::entities::{favorites, prelude::*};

pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, user_id: &str, recipe_id: &str) -> Result<()> {
        let model = favorites::ActiveModel {
            user_id: Set(user_id.to_string()),
            recipe_id: Set(recipe_id.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        model
            .insert(&self.conn)
            .await
            .context("Failed to insert favorite")?;

        info!("User {} favorited recipe {}", user_id, recipe_id);
        Ok(())
    }

    /// Returns whether a row was actually removed.
    pub async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<bool> {
        let result = Favorites::delete_many()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::RecipeId.eq(recipe_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete favorite")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(&self, user_id: &str, recipe_id: &str) -> Result<bool> {
        let count = Favorites::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::RecipeId.eq(recipe_id))
            .count(&self.conn)
            .await
            .context("Failed to check favorite")?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Favorites::find()
            .count(&self.conn)
            .await
            .context("Failed to count favorites")
    }

    pub async fn recipe_ids_for_user(&self, user_id: &str) -> Result<Vec<String>> {
        let rows = Favorites::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .all(&self.conn)
            .await
            .context("Failed to list favorites for user")?;

        Ok(rows.into_iter().map(|f| f.recipe_id).collect())
    }
}
