use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::{CategoryError, FavoriteError, IngredientError, RecipeError, UserError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    /// Uniqueness or business-invariant violation. Reported as a 400 like
    /// validation failures; the distinction lives in the message.
    Conflict(String),

    DatabaseError(String),

    InternalError(String),

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::ValidationError(msg) | ApiError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => ApiError::ValidationError(msg),
            UserError::Conflict(msg) => ApiError::Conflict(msg),
            UserError::NotFound(msg) => ApiError::NotFound(msg),
            UserError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl From<IngredientError> for ApiError {
    fn from(err: IngredientError) -> Self {
        match err {
            IngredientError::Validation(msg) => ApiError::ValidationError(msg),
            IngredientError::Conflict(msg) => ApiError::Conflict(msg),
            IngredientError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::Validation(msg) => ApiError::ValidationError(msg),
            CategoryError::Conflict(msg) => ApiError::Conflict(msg),
            CategoryError::NotFound(msg) => ApiError::NotFound(msg),
            CategoryError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl From<RecipeError> for ApiError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::Validation(msg) => ApiError::ValidationError(msg),
            RecipeError::Conflict(msg) => ApiError::Conflict(msg),
            RecipeError::NotFound(msg) => ApiError::NotFound(msg),
            RecipeError::Database(msg) => ApiError::DatabaseError(msg),
            RecipeError::Integrity(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<FavoriteError> for ApiError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::Conflict(msg) => ApiError::Conflict(msg),
            FavoriteError::NotFound(msg) => ApiError::NotFound(msg),
            FavoriteError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}
