use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{info, warn};

use crate::entities::{
    favorites, prelude::*, recipe_categories, recipe_ingredients, recipe_steps, recipes, users,
};
use crate::services::recipe_service::{IngredientRef, RecipeDetails, compose_details};

pub struct RecipeRepository {
    conn: DatabaseConnection,
}

impl RecipeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Scalar row operations
    // ========================================================================

    pub async fn get_by_id(&self, id: &str) -> Result<Option<recipes::Model>> {
        Recipes::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query recipe by id")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<recipes::Model>> {
        Recipes::find()
            .filter(recipes::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query recipe by name")
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let count = Recipes::find()
            .filter(recipes::Column::Name.eq(name))
            .count(&self.conn)
            .await
            .context("Failed to count recipes by name")?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Recipes::find()
            .count(&self.conn)
            .await
            .context("Failed to count recipes")
    }

    /// Updates name and description only; child rows are untouched.
    pub async fn update_scalars(&self, id: &str, name: &str, description: &str) -> Result<()> {
        Recipes::update_many()
            .col_expr(recipes::Column::Name, sea_orm::sea_query::Expr::value(name))
            .col_expr(
                recipes::Column::Description,
                sea_orm::sea_query::Expr::value(description),
            )
            .filter(recipes::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update recipe scalars")?;

        Ok(())
    }

    // ========================================================================
    // Aggregate writes
    // ========================================================================

    /// Inserts the recipe row and all child rows as one transaction.
    /// Step numbers are assigned 1..N in input order.
    pub async fn insert_with_children(
        &self,
        owner_user_id: &str,
        name: &str,
        description: &str,
        ingredients: &[IngredientRef],
        category_ids: &[String],
        steps: &[String],
    ) -> Result<String> {
        let recipe_id = uuid::Uuid::new_v4().to_string();
        let txn = self.conn.begin().await?;

        let model = recipes::ActiveModel {
            id: Set(recipe_id.clone()),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            owner_user_id: Set(owner_user_id.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };
        model
            .insert(&txn)
            .await
            .context("Failed to insert recipe")?;

        Self::insert_child_rows(&txn, &recipe_id, ingredients, category_ids, steps).await?;

        txn.commit().await?;

        info!("Created recipe '{}' ({})", name, recipe_id);
        Ok(recipe_id)
    }

    /// Bulk-deletes all ingredient links for a recipe, straight against the
    /// store rather than through a loaded object graph.
    pub async fn delete_ingredient_links(&self, recipe_id: &str) -> Result<()> {
        RecipeIngredients::delete_many()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete recipe ingredient links")?;
        Ok(())
    }

    pub async fn delete_category_links(&self, recipe_id: &str) -> Result<()> {
        RecipeCategories::delete_many()
            .filter(recipe_categories::Column::RecipeId.eq(recipe_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete recipe category links")?;
        Ok(())
    }

    pub async fn delete_steps(&self, recipe_id: &str) -> Result<()> {
        RecipeSteps::delete_many()
            .filter(recipe_steps::Column::RecipeId.eq(recipe_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete recipe steps")?;
        Ok(())
    }

    /// Inserts fresh child rows for a recipe as one transaction. Callers must
    /// have cleared the old children first; the composite keys would collide
    /// otherwise.
    pub async fn insert_children(
        &self,
        recipe_id: &str,
        ingredients: &[IngredientRef],
        category_ids: &[String],
        steps: &[String],
    ) -> Result<()> {
        let txn = self.conn.begin().await?;
        Self::insert_child_rows(&txn, recipe_id, ingredients, category_ids, steps).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn insert_child_rows<C: sea_orm::ConnectionTrait>(
        conn: &C,
        recipe_id: &str,
        ingredients: &[IngredientRef],
        category_ids: &[String],
        steps: &[String],
    ) -> Result<()> {
        if !ingredients.is_empty() {
            let links: Vec<recipe_ingredients::ActiveModel> = ingredients
                .iter()
                .map(|item| recipe_ingredients::ActiveModel {
                    recipe_id: Set(recipe_id.to_string()),
                    ingredient_id: Set(item.ingredient_id.clone()),
                    quantity: Set(item.quantity.clone()),
                })
                .collect();

            RecipeIngredients::insert_many(links)
                .exec(conn)
                .await
                .context("Failed to insert recipe ingredient links")?;
        }

        if !category_ids.is_empty() {
            let links: Vec<recipe_categories::ActiveModel> = category_ids
                .iter()
                .map(|category_id| recipe_categories::ActiveModel {
                    recipe_id: Set(recipe_id.to_string()),
                    category_id: Set(category_id.clone()),
                })
                .collect();

            RecipeCategories::insert_many(links)
                .exec(conn)
                .await
                .context("Failed to insert recipe category links")?;
        }

        if !steps.is_empty() {
            let rows: Vec<recipe_steps::ActiveModel> = steps
                .iter()
                .enumerate()
                .map(|(index, description)| recipe_steps::ActiveModel {
                    id: Set(uuid::Uuid::new_v4().to_string()),
                    recipe_id: Set(recipe_id.to_string()),
                    step_number: Set(i32::try_from(index).unwrap_or(i32::MAX - 1) + 1),
                    description: Set(description.clone()),
                })
                .collect();

            RecipeSteps::insert_many(rows)
                .exec(conn)
                .await
                .context("Failed to insert recipe steps")?;
        }

        Ok(())
    }

    /// Removes the recipe and cascades to its ingredient links, category
    /// links, steps and favorites in one transaction.
    pub async fn delete(&self, recipe_id: &str) -> Result<()> {
        let txn = self.conn.begin().await?;

        Favorites::delete_many()
            .filter(favorites::Column::RecipeId.eq(recipe_id))
            .exec(&txn)
            .await?;
        RecipeSteps::delete_many()
            .filter(recipe_steps::Column::RecipeId.eq(recipe_id))
            .exec(&txn)
            .await?;
        RecipeIngredients::delete_many()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .exec(&txn)
            .await?;
        RecipeCategories::delete_many()
            .filter(recipe_categories::Column::RecipeId.eq(recipe_id))
            .exec(&txn)
            .await?;
        Recipes::delete_by_id(recipe_id).exec(&txn).await?;

        txn.commit().await?;

        info!("Deleted recipe {}", recipe_id);
        Ok(())
    }

    // ========================================================================
    // Read-side composition
    // ========================================================================

    pub async fn get_details(&self, recipe_id: &str) -> Result<Option<RecipeDetails>> {
        let Some(recipe) = self.get_by_id(recipe_id).await? else {
            return Ok(None);
        };

        let mut composed = self.compose_many(vec![recipe]).await?;
        Ok(composed.pop())
    }

    pub async fn list_details_all(&self) -> Result<Vec<RecipeDetails>> {
        let rows = Recipes::find()
            .order_by_asc(recipes::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list recipes")?;

        self.compose_many(rows).await
    }

    pub async fn list_details_by_user(&self, user_id: &str) -> Result<Vec<RecipeDetails>> {
        let rows = Recipes::find()
            .filter(recipes::Column::OwnerUserId.eq(user_id))
            .order_by_asc(recipes::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list recipes by user")?;

        self.compose_many(rows).await
    }

    pub async fn list_details_by_category(&self, category_id: &str) -> Result<Vec<RecipeDetails>> {
        let recipe_ids: Vec<String> = RecipeCategories::find()
            .filter(recipe_categories::Column::CategoryId.eq(category_id))
            .all(&self.conn)
            .await
            .context("Failed to query category links")?
            .into_iter()
            .map(|link| link.recipe_id)
            .collect();

        self.list_details_by_ids(&recipe_ids).await
    }

    pub async fn list_details_by_ingredient(
        &self,
        ingredient_id: &str,
    ) -> Result<Vec<RecipeDetails>> {
        let recipe_ids: Vec<String> = RecipeIngredients::find()
            .filter(recipe_ingredients::Column::IngredientId.eq(ingredient_id))
            .all(&self.conn)
            .await
            .context("Failed to query ingredient links")?
            .into_iter()
            .map(|link| link.recipe_id)
            .collect();

        self.list_details_by_ids(&recipe_ids).await
    }

    pub async fn list_details_by_ids(&self, recipe_ids: &[String]) -> Result<Vec<RecipeDetails>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Recipes::find()
            .filter(recipes::Column::Id.is_in(recipe_ids.iter().cloned()))
            .order_by_asc(recipes::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list recipes by ids")?;

        self.compose_many(rows).await
    }

    /// Batch-loads owners, child rows and referenced names, then assembles
    /// each recipe through the pure composition function.
    async fn compose_many(&self, rows: Vec<recipes::Model>) -> Result<Vec<RecipeDetails>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let recipe_ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let owner_ids: Vec<String> = rows.iter().map(|r| r.owner_user_id.clone()).collect();

        let owners: HashMap<String, users::Model> = Users::find()
            .filter(users::Column::Id.is_in(owner_ids))
            .all(&self.conn)
            .await
            .context("Failed to load recipe owners")?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let ingredient_links = RecipeIngredients::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.iter().cloned()))
            .all(&self.conn)
            .await
            .context("Failed to load ingredient links")?;

        let category_links = RecipeCategories::find()
            .filter(recipe_categories::Column::RecipeId.is_in(recipe_ids.iter().cloned()))
            .all(&self.conn)
            .await
            .context("Failed to load category links")?;

        let steps = RecipeSteps::find()
            .filter(recipe_steps::Column::RecipeId.is_in(recipe_ids.iter().cloned()))
            .order_by_asc(recipe_steps::Column::StepNumber)
            .all(&self.conn)
            .await
            .context("Failed to load steps")?;

        let ingredient_ids: Vec<String> = ingredient_links
            .iter()
            .map(|link| link.ingredient_id.clone())
            .collect();
        let ingredient_names: HashMap<String, String> = Ingredients::find()
            .filter(crate::entities::ingredients::Column::Id.is_in(ingredient_ids))
            .all(&self.conn)
            .await
            .context("Failed to load ingredient names")?
            .into_iter()
            .map(|i| (i.id, i.name))
            .collect();

        let category_ids: Vec<String> = category_links
            .iter()
            .map(|link| link.category_id.clone())
            .collect();
        let category_names: HashMap<String, String> = Categories::find()
            .filter(crate::entities::categories::Column::Id.is_in(category_ids))
            .all(&self.conn)
            .await
            .context("Failed to load category names")?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut details = Vec::with_capacity(rows.len());
        for recipe in &rows {
            let Some(owner) = owners.get(&recipe.owner_user_id) else {
                // A dangling owner means the row escaped the cascade rules.
                warn!("Recipe {} has no owner row; skipping", recipe.id);
                continue;
            };

            let links: Vec<_> = ingredient_links
                .iter()
                .filter(|l| l.recipe_id == recipe.id)
                .cloned()
                .collect();
            let cats: Vec<_> = category_links
                .iter()
                .filter(|l| l.recipe_id == recipe.id)
                .cloned()
                .collect();
            let recipe_steps: Vec<_> = steps
                .iter()
                .filter(|s| s.recipe_id == recipe.id)
                .cloned()
                .collect();

            details.push(compose_details(
                recipe,
                owner,
                &ingredient_names,
                &category_names,
                &links,
                &cats,
                &recipe_steps,
            ));
        }

        Ok(details)
    }
}
