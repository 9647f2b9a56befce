use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::services::RecipeDetails;

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub user_id: String,
    pub recipe_id: String,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteCheckParams {
    pub user_id: String,
    pub recipe_id: String,
}

#[derive(Debug, Serialize)]
pub struct FavoriteCheckDto {
    pub is_favorite: bool,
}

pub async fn list_user_favorites(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<RecipeDetails>>>, ApiError> {
    let recipes = state.favorite_service.list_for_user(&user_id).await?;
    Ok(Json(ApiResponse::success(recipes)))
}

pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FavoriteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), ApiError> {
    state
        .favorite_service
        .add(&payload.user_id, &payload.recipe_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Favorite added successfully".to_string())),
    ))
}

pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FavoriteRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .favorite_service
        .remove(&payload.user_id, &payload.recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_favorite(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FavoriteCheckParams>,
) -> Result<Json<ApiResponse<FavoriteCheckDto>>, ApiError> {
    let is_favorite = state
        .favorite_service
        .is_favorite(&params.user_id, &params.recipe_id)
        .await?;

    Ok(Json(ApiResponse::success(FavoriteCheckDto { is_favorite })))
}
