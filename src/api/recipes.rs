use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::services::{IngredientRef, RecipeDetails, RecipeInput};

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owner_user_id: String,
    pub ingredients: Vec<IngredientRef>,
    pub category_ids: Vec<String>,
    pub steps: Vec<String>,
}

pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RecipeDetails>>>, ApiError> {
    let recipes = state.recipe_service.list_all().await?;
    Ok(Json(ApiResponse::success(recipes)))
}

pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RecipeDetails>>, ApiError> {
    match state.recipe_service.get_by_id(&id).await? {
        Some(recipe) => Ok(Json(ApiResponse::success(recipe))),
        None => Err(ApiError::NotFound(format!("Recipe {id} not found"))),
    }
}

pub async fn list_recipes_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<RecipeDetails>>>, ApiError> {
    let recipes = state.recipe_service.list_by_user(&user_id).await?;
    Ok(Json(ApiResponse::success(recipes)))
}

pub async fn list_recipes_by_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<RecipeDetails>>>, ApiError> {
    let recipes = state.recipe_service.list_by_category(&category_id).await?;
    Ok(Json(ApiResponse::success(recipes)))
}

pub async fn list_recipes_by_ingredient(
    State(state): State<Arc<AppState>>,
    Path(ingredient_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<RecipeDetails>>>, ApiError> {
    let recipes = state.recipe_service.list_by_ingredient(&ingredient_id).await?;
    Ok(Json(ApiResponse::success(recipes)))
}

pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RecipeDetails>>), ApiError> {
    let input = RecipeInput {
        name: payload.name,
        description: payload.description,
        ingredients: payload.ingredients,
        category_ids: payload.category_ids,
        steps: payload.steps,
    };

    let recipe = state
        .recipe_service
        .create(&payload.owner_user_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(recipe))))
}

pub async fn update_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<RecipeInput>,
) -> Result<Json<ApiResponse<RecipeDetails>>, ApiError> {
    let recipe = state.recipe_service.update(&id, payload).await?;
    Ok(Json(ApiResponse::success(recipe)))
}

pub async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.recipe_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
