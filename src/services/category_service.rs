//! Domain service for the category catalog.

use serde::Serialize;
use thiserror::Error;

use crate::entities::categories;

#[derive(Debug, Serialize, Clone)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
}

impl From<categories::Model> for CategoryDto {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CategoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CategoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait CategoryService: Send + Sync {
    async fn create(&self, name: &str) -> Result<CategoryDto, CategoryError>;

    /// Renames a category. A name collision with a *different* category is a
    /// conflict; re-submitting a category's own name is fine.
    async fn update(&self, id: &str, name: &str) -> Result<CategoryDto, CategoryError>;

    /// Removes the category; its recipe join rows go with it.
    async fn delete(&self, id: &str) -> Result<(), CategoryError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<CategoryDto>, CategoryError>;

    async fn get_by_name(&self, name: &str) -> Result<Option<CategoryDto>, CategoryError>;

    async fn list_all(&self) -> Result<Vec<CategoryDto>, CategoryError>;
}
