//! Domain service for the ingredient catalog.

use serde::Serialize;
use thiserror::Error;

use crate::entities::ingredients;

#[derive(Debug, Serialize, Clone)]
pub struct IngredientDto {
    pub id: String,
    pub name: String,
}

impl From<ingredients::Model> for IngredientDto {
    fn from(model: ingredients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Error)]
pub enum IngredientError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for IngredientError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for IngredientError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait IngredientService: Send + Sync {
    async fn create(&self, name: &str) -> Result<IngredientDto, IngredientError>;

    /// Idempotent upsert by exact name match: returns the existing ingredient
    /// if present, otherwise creates it.
    async fn get_or_create(&self, name: &str) -> Result<IngredientDto, IngredientError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<IngredientDto>, IngredientError>;

    async fn get_by_name(&self, name: &str) -> Result<Option<IngredientDto>, IngredientError>;

    async fn list_all(&self) -> Result<Vec<IngredientDto>, IngredientError>;
}
