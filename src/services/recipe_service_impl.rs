//! `SeaORM` implementation of the `RecipeService` trait.
//!
//! The update path deliberately avoids mutating a loaded object graph:
//! replacing children by clearing an in-memory collection and re-adding rows
//! with the same composite keys is ambiguous to change tracking before the
//! store commits. Instead it runs three ordered, durable steps: persist the
//! scalar fields, bulk-delete every child row by recipe id, then insert the
//! fresh child rows.

use async_trait::async_trait;
use tracing::warn;

use crate::db::Store;
use crate::services::recipe_service::{
    RecipeDetails, RecipeError, RecipeInput, RecipeService,
};

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_QUANTITY_LEN: usize = 50;
const MAX_STEP_LEN: usize = 1000;

pub struct SeaOrmRecipeService {
    store: Store,
}

impl SeaOrmRecipeService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Shape checks against the caller's input alone; no store access.
    fn validate_shape(input: &RecipeInput) -> Result<(), RecipeError> {
        if input.name.trim().is_empty() {
            return Err(RecipeError::Validation("Recipe name cannot be empty".into()));
        }
        if input.name.chars().count() > MAX_NAME_LEN {
            return Err(RecipeError::Validation(format!(
                "Recipe name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        if input.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(RecipeError::Validation(format!(
                "Description cannot exceed {MAX_DESCRIPTION_LEN} characters"
            )));
        }

        if input.ingredients.is_empty() {
            return Err(RecipeError::Validation(
                "Recipe must have at least one ingredient".into(),
            ));
        }
        for item in &input.ingredients {
            if item.quantity.chars().count() > MAX_QUANTITY_LEN {
                return Err(RecipeError::Validation(format!(
                    "Quantity cannot exceed {MAX_QUANTITY_LEN} characters"
                )));
            }
        }

        if input.category_ids.is_empty() {
            return Err(RecipeError::Validation(
                "Recipe must have at least one category".into(),
            ));
        }

        if input.steps.is_empty() {
            return Err(RecipeError::Validation(
                "Recipe must have at least one preparation step".into(),
            ));
        }
        for step in &input.steps {
            if step.trim().is_empty() {
                return Err(RecipeError::Validation(
                    "Step description cannot be empty".into(),
                ));
            }
            if step.chars().count() > MAX_STEP_LEN {
                return Err(RecipeError::Validation(format!(
                    "Step description cannot exceed {MAX_STEP_LEN} characters"
                )));
            }
        }

        Ok(())
    }

    /// Fails on the first referenced ingredient or category id that does not
    /// resolve. Runs before any mutation.
    async fn validate_references(&self, input: &RecipeInput) -> Result<(), RecipeError> {
        for item in &input.ingredients {
            if self.store.get_ingredient(&item.ingredient_id).await?.is_none() {
                return Err(RecipeError::NotFound(format!(
                    "Ingredient with id {} not found",
                    item.ingredient_id
                )));
            }
        }

        for category_id in &input.category_ids {
            if self.store.get_category(category_id).await?.is_none() {
                return Err(RecipeError::NotFound(format!(
                    "Category with id {category_id} not found"
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl RecipeService for SeaOrmRecipeService {
    async fn create(
        &self,
        owner_user_id: &str,
        input: RecipeInput,
    ) -> Result<RecipeDetails, RecipeError> {
        if input.name.trim().is_empty() {
            return Err(RecipeError::Validation("Recipe name cannot be empty".into()));
        }
        if self.store.recipe_name_exists(&input.name).await? {
            return Err(RecipeError::Conflict(format!(
                "Recipe with name '{}' already exists",
                input.name
            )));
        }

        // Remaining shape checks before any reference lookup or write.
        Self::validate_shape(&input)?;

        if self.store.get_user(owner_user_id).await?.is_none() {
            return Err(RecipeError::NotFound("User not found".into()));
        }
        self.validate_references(&input).await?;

        let recipe_id = self
            .store
            .insert_recipe_with_children(
                owner_user_id,
                &input.name,
                &input.description,
                &input.ingredients,
                &input.category_ids,
                &input.steps,
            )
            .await?;

        self.store
            .get_recipe_details(&recipe_id)
            .await?
            .ok_or_else(|| RecipeError::Integrity("Recipe not found after create".into()))
    }

    async fn update(
        &self,
        recipe_id: &str,
        input: RecipeInput,
    ) -> Result<RecipeDetails, RecipeError> {
        // 1. Shape first, against the input alone.
        Self::validate_shape(&input)?;

        // 2. The recipe itself, loaded without children.
        if self.store.get_recipe(recipe_id).await?.is_none() {
            return Err(RecipeError::NotFound("Recipe not found".into()));
        }

        // 3. Name uniqueness against *other* recipes.
        if let Some(existing) = self.store.get_recipe_by_name(&input.name).await?
            && existing.id != recipe_id
        {
            return Err(RecipeError::Conflict(format!(
                "Recipe with name '{}' already exists",
                input.name
            )));
        }

        // 4. Every referenced id, still before any mutation.
        self.validate_references(&input).await?;

        // 5. Scalars alone, as the first durable step.
        self.store
            .update_recipe_scalars(recipe_id, &input.name, &input.description)
            .await?;

        // 6. Old children gone, by key, independent of any tracking state.
        self.store.delete_recipe_category_links(recipe_id).await?;
        self.store.delete_recipe_steps(recipe_id).await?;
        self.store.delete_recipe_ingredient_links(recipe_id).await?;

        // 7. Fresh children as the second commit; step numbers regenerate
        //    1..N from submission order.
        self.store
            .insert_recipe_children(
                recipe_id,
                &input.ingredients,
                &input.category_ids,
                &input.steps,
            )
            .await?;

        // 8. Re-fetch the composed shape.
        self.store.get_recipe_details(recipe_id).await?.ok_or_else(|| {
            warn!("Recipe {} vanished between update commits", recipe_id);
            RecipeError::Integrity("Recipe not found after update".into())
        })
    }

    async fn delete(&self, recipe_id: &str) -> Result<(), RecipeError> {
        if self.store.get_recipe(recipe_id).await?.is_none() {
            return Err(RecipeError::NotFound("Recipe not found".into()));
        }

        self.store.delete_recipe(recipe_id).await?;
        Ok(())
    }

    async fn get_by_id(&self, recipe_id: &str) -> Result<Option<RecipeDetails>, RecipeError> {
        Ok(self.store.get_recipe_details(recipe_id).await?)
    }

    async fn list_all(&self) -> Result<Vec<RecipeDetails>, RecipeError> {
        Ok(self.store.list_recipe_details().await?)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<RecipeDetails>, RecipeError> {
        Ok(self.store.list_recipe_details_by_user(user_id).await?)
    }

    async fn list_by_category(&self, category_id: &str) -> Result<Vec<RecipeDetails>, RecipeError> {
        Ok(self.store.list_recipe_details_by_category(category_id).await?)
    }

    async fn list_by_ingredient(
        &self,
        ingredient_id: &str,
    ) -> Result<Vec<RecipeDetails>, RecipeError> {
        Ok(self
            .store
            .list_recipe_details_by_ingredient(ingredient_id)
            .await?)
    }
}
