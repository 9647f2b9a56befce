//! Domain service for the user↔recipe favorite relation.

use thiserror::Error;

use crate::services::recipe_service::RecipeDetails;

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for FavoriteError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for FavoriteError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait FavoriteService: Send + Sync {
    /// Both sides must exist, users cannot favorite their own recipes, and a
    /// pair can only be added once.
    async fn add(&self, user_id: &str, recipe_id: &str) -> Result<(), FavoriteError>;

    /// Removing a pair that does not exist is an error.
    async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<(), FavoriteError>;

    /// Pure existence check; an unknown user or recipe is simply "not a
    /// favorite".
    async fn is_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool, FavoriteError>;

    /// Fully-composed recipes for every favorite the user holds.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<RecipeDetails>, FavoriteError>;
}
