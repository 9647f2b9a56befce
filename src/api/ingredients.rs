use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::services::IngredientDto;

#[derive(Debug, Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
}

pub async fn list_ingredients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<IngredientDto>>>, ApiError> {
    let ingredients = state.ingredient_service.list_all().await?;
    Ok(Json(ApiResponse::success(ingredients)))
}

pub async fn get_ingredient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<IngredientDto>>, ApiError> {
    match state.ingredient_service.get_by_id(&id).await? {
        Some(ingredient) => Ok(Json(ApiResponse::success(ingredient))),
        None => Err(ApiError::NotFound(format!("Ingredient {id} not found"))),
    }
}

pub async fn create_ingredient(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IngredientDto>>), ApiError> {
    let ingredient = state.ingredient_service.create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(ingredient))))
}
