//! Domain service for user registration and credential checks.

use serde::Serialize;
use thiserror::Error;

use crate::entities::users;

/// User shape handed to callers; never carries the password hash.
#[derive(Debug, Serialize, Clone)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

impl From<users::Model> for UserDto {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Creates a user with a derived password hash.
    async fn register(&self, username: &str, password: &str) -> Result<UserDto, UserError>;

    /// `None` for an unknown username or a digest mismatch; callers cannot
    /// tell the two apart.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserDto>, UserError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<UserDto>, UserError>;

    async fn list_all(&self) -> Result<Vec<UserDto>, UserError>;
}
