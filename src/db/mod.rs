use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

use crate::entities::{categories, ingredients, recipes, users};
use crate::services::recipe_service::{IngredientRef, RecipeDetails};

pub mod migrator;
pub mod repositories;

/// Facade over the shared connection: hands out per-entity repositories and
/// is the single transactional boundary the services talk to.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        // SQLite in-memory databases are per-connection; a wider pool would
        // hand out empty databases.
        if db_url.contains(":memory:") {
            Self::with_pool_options(db_url, 1, 1).await
        } else {
            Self::with_pool_options(db_url, 5, 1).await
        }
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn ingredient_repo(&self) -> repositories::ingredient::IngredientRepository {
        repositories::ingredient::IngredientRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn recipe_repo(&self) -> repositories::recipe::RecipeRepository {
        repositories::recipe::RecipeRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn insert_user(&self, username: &str, password_hash: &str) -> Result<users::Model> {
        self.user_repo().insert(username, password_hash).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        self.user_repo().username_exists(username).await
    }

    pub async fn list_users(&self) -> Result<Vec<users::Model>> {
        self.user_repo().list_all().await
    }

    // ========== Ingredients ==========

    pub async fn insert_ingredient(&self, name: &str) -> Result<ingredients::Model> {
        self.ingredient_repo().insert(name).await
    }

    pub async fn get_ingredient(&self, id: &str) -> Result<Option<ingredients::Model>> {
        self.ingredient_repo().get_by_id(id).await
    }

    pub async fn get_ingredient_by_name(&self, name: &str) -> Result<Option<ingredients::Model>> {
        self.ingredient_repo().get_by_name(name).await
    }

    pub async fn ingredient_name_exists(&self, name: &str) -> Result<bool> {
        self.ingredient_repo().name_exists(name).await
    }

    pub async fn list_ingredients(&self) -> Result<Vec<ingredients::Model>> {
        self.ingredient_repo().list_all().await
    }

    // ========== Categories ==========

    pub async fn insert_category(&self, name: &str) -> Result<categories::Model> {
        self.category_repo().insert(name).await
    }

    pub async fn get_category(&self, id: &str) -> Result<Option<categories::Model>> {
        self.category_repo().get_by_id(id).await
    }

    pub async fn get_category_by_name(&self, name: &str) -> Result<Option<categories::Model>> {
        self.category_repo().get_by_name(name).await
    }

    pub async fn category_name_exists(&self, name: &str) -> Result<bool> {
        self.category_repo().name_exists(name).await
    }

    pub async fn update_category_name(&self, id: &str, name: &str) -> Result<categories::Model> {
        self.category_repo().update_name(id, name).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<()> {
        self.category_repo().delete(id).await
    }

    pub async fn list_categories(&self) -> Result<Vec<categories::Model>> {
        self.category_repo().list_all().await
    }

    // ========== Recipes ==========

    pub async fn insert_recipe_with_children(
        &self,
        owner_user_id: &str,
        name: &str,
        description: &str,
        ingredients: &[IngredientRef],
        category_ids: &[String],
        steps: &[String],
    ) -> Result<String> {
        self.recipe_repo()
            .insert_with_children(owner_user_id, name, description, ingredients, category_ids, steps)
            .await
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Option<recipes::Model>> {
        self.recipe_repo().get_by_id(id).await
    }

    pub async fn get_recipe_by_name(&self, name: &str) -> Result<Option<recipes::Model>> {
        self.recipe_repo().get_by_name(name).await
    }

    pub async fn recipe_name_exists(&self, name: &str) -> Result<bool> {
        self.recipe_repo().name_exists(name).await
    }

    pub async fn recipe_count(&self) -> Result<u64> {
        self.recipe_repo().count().await
    }

    pub async fn update_recipe_scalars(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        self.recipe_repo().update_scalars(id, name, description).await
    }

    pub async fn delete_recipe_ingredient_links(&self, recipe_id: &str) -> Result<()> {
        self.recipe_repo().delete_ingredient_links(recipe_id).await
    }

    pub async fn delete_recipe_category_links(&self, recipe_id: &str) -> Result<()> {
        self.recipe_repo().delete_category_links(recipe_id).await
    }

    pub async fn delete_recipe_steps(&self, recipe_id: &str) -> Result<()> {
        self.recipe_repo().delete_steps(recipe_id).await
    }

    pub async fn insert_recipe_children(
        &self,
        recipe_id: &str,
        ingredients: &[IngredientRef],
        category_ids: &[String],
        steps: &[String],
    ) -> Result<()> {
        self.recipe_repo()
            .insert_children(recipe_id, ingredients, category_ids, steps)
            .await
    }

    pub async fn delete_recipe(&self, recipe_id: &str) -> Result<()> {
        self.recipe_repo().delete(recipe_id).await
    }

    pub async fn get_recipe_details(&self, recipe_id: &str) -> Result<Option<RecipeDetails>> {
        self.recipe_repo().get_details(recipe_id).await
    }

    pub async fn list_recipe_details(&self) -> Result<Vec<RecipeDetails>> {
        self.recipe_repo().list_details_all().await
    }

    pub async fn list_recipe_details_by_user(&self, user_id: &str) -> Result<Vec<RecipeDetails>> {
        self.recipe_repo().list_details_by_user(user_id).await
    }

    pub async fn list_recipe_details_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<RecipeDetails>> {
        self.recipe_repo().list_details_by_category(category_id).await
    }

    pub async fn list_recipe_details_by_ingredient(
        &self,
        ingredient_id: &str,
    ) -> Result<Vec<RecipeDetails>> {
        self.recipe_repo()
            .list_details_by_ingredient(ingredient_id)
            .await
    }

    pub async fn list_recipe_details_by_ids(
        &self,
        recipe_ids: &[String],
    ) -> Result<Vec<RecipeDetails>> {
        self.recipe_repo().list_details_by_ids(recipe_ids).await
    }

    // ========== Favorites ==========

    pub async fn insert_favorite(&self, user_id: &str, recipe_id: &str) -> Result<()> {
        self.favorite_repo().insert(user_id, recipe_id).await
    }

    pub async fn remove_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool> {
        self.favorite_repo().remove(user_id, recipe_id).await
    }

    pub async fn favorite_exists(&self, user_id: &str, recipe_id: &str) -> Result<bool> {
        self.favorite_repo().exists(user_id, recipe_id).await
    }

    pub async fn favorite_count(&self) -> Result<u64> {
        self.favorite_repo().count().await
    }

    pub async fn favorite_recipe_ids_for_user(&self, user_id: &str) -> Result<Vec<String>> {
        self.favorite_repo().recipe_ids_for_user(user_id).await
    }
}
