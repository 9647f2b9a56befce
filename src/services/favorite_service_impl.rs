//! `SeaORM` implementation of the `FavoriteService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::services::favorite_service::{FavoriteError, FavoriteService};
use crate::services::recipe_service::RecipeDetails;

pub struct SeaOrmFavoriteService {
    store: Store,
}

impl SeaOrmFavoriteService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FavoriteService for SeaOrmFavoriteService {
    async fn add(&self, user_id: &str, recipe_id: &str) -> Result<(), FavoriteError> {
        if self.store.get_user(user_id).await?.is_none() {
            return Err(FavoriteError::NotFound("User not found".into()));
        }

        let Some(recipe) = self.store.get_recipe(recipe_id).await? else {
            return Err(FavoriteError::NotFound("Recipe not found".into()));
        };

        if recipe.owner_user_id == user_id {
            return Err(FavoriteError::Conflict(
                "Users cannot favorite their own recipes".into(),
            ));
        }

        if self.store.favorite_exists(user_id, recipe_id).await? {
            return Err(FavoriteError::Conflict(
                "Recipe is already in favorites".into(),
            ));
        }

        self.store.insert_favorite(user_id, recipe_id).await?;
        Ok(())
    }

    async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<(), FavoriteError> {
        let removed = self.store.remove_favorite(user_id, recipe_id).await?;
        if removed {
            Ok(())
        } else {
            Err(FavoriteError::NotFound(
                "Recipe is not in favorites".into(),
            ))
        }
    }

    async fn is_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool, FavoriteError> {
        Ok(self.store.favorite_exists(user_id, recipe_id).await?)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<RecipeDetails>, FavoriteError> {
        let recipe_ids = self.store.favorite_recipe_ids_for_user(user_id).await?;
        Ok(self.store.list_recipe_details_by_ids(&recipe_ids).await?)
    }
}
