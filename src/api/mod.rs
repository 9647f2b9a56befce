use axum::{
    Json, Router,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CategoryService, FavoriteService, IngredientService, RecipeService, SeaOrmCategoryService,
    SeaOrmFavoriteService, SeaOrmIngredientService, SeaOrmRecipeService, SeaOrmUserService,
    UserService,
};

mod categories;
mod error;
mod favorites;
mod ingredients;
mod recipes;
mod types;
mod users;

pub use error::ApiError;
pub use types::ApiResponse;

pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub user_service: Arc<dyn UserService>,

    pub ingredient_service: Arc<dyn IngredientService>,

    pub category_service: Arc<dyn CategoryService>,

    pub recipe_service: Arc<dyn RecipeService>,

    pub favorite_service: Arc<dyn FavoriteService>,
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::new(&config.general.database_path).await?;

    Ok(Arc::new(AppState {
        config,
        user_service: Arc::new(SeaOrmUserService::new(store.clone())),
        ingredient_service: Arc::new(SeaOrmIngredientService::new(store.clone())),
        category_service: Arc::new(SeaOrmCategoryService::new(store.clone())),
        recipe_service: Arc::new(SeaOrmRecipeService::new(store.clone())),
        favorite_service: Arc::new(SeaOrmFavoriteService::new(store.clone())),
        store,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .route("/users/register", post(users::register))
        .route("/users/authenticate", post(users::authenticate))
        .route("/ingredients", get(ingredients::list_ingredients))
        .route("/ingredients/{id}", get(ingredients::get_ingredient))
        .route("/ingredients", post(ingredients::create_ingredient))
        .route("/categories", get(categories::list_categories))
        .route("/categories/{id}", get(categories::get_category))
        .route("/categories", post(categories::create_category))
        .route("/categories/{id}", put(categories::update_category))
        .route("/categories/{id}", delete(categories::delete_category))
        .route("/recipes", get(recipes::list_recipes))
        .route("/recipes/{id}", get(recipes::get_recipe))
        .route("/recipes/user/{user_id}", get(recipes::list_recipes_by_user))
        .route(
            "/recipes/category/{category_id}",
            get(recipes::list_recipes_by_category),
        )
        .route(
            "/recipes/ingredient/{ingredient_id}",
            get(recipes::list_recipes_by_ingredient),
        )
        .route("/recipes", post(recipes::create_recipe))
        .route("/recipes/{id}", put(recipes::update_recipe))
        .route("/recipes/{id}", delete(recipes::delete_recipe))
        .route("/favorites/user/{user_id}", get(favorites::list_user_favorites))
        .route("/favorites", post(favorites::add_favorite))
        .route("/favorites", delete(favorites::remove_favorite))
        .route("/favorites/check", get(favorites::check_favorite))
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/health", get(health))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn health(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Result<Json<ApiResponse<&'static str>>, ApiError> {
    state.store.ping().await?;
    Ok(Json(ApiResponse::success("ok")))
}
