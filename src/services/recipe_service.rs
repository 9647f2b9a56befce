//! Domain service for the recipe aggregate: a recipe row plus its
//! ingredient links, category links and ordered steps, treated as one
//! consistency unit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{recipe_categories, recipe_ingredients, recipe_steps, recipes, users};

/// A recipe enriched with its owner, ingredient names, category names and
/// ordered steps, ready for presentation.
#[derive(Debug, Serialize, Clone)]
pub struct RecipeDetails {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: RecipeOwner,
    pub created_at: String,
    pub ingredients: Vec<IngredientLine>,
    pub categories: Vec<CategoryLine>,
    pub steps: Vec<StepLine>,
}

#[derive(Debug, Serialize, Clone)]
pub struct RecipeOwner {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct IngredientLine {
    pub ingredient_id: String,
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct CategoryLine {
    pub category_id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct StepLine {
    pub step_number: i32,
    pub description: String,
}

/// Full payload for create and update. Updates replace the scalar fields and
/// all three child collections wholesale; there is no partial patch.
#[derive(Debug, Deserialize, Clone)]
pub struct RecipeInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<IngredientRef>,
    pub category_ids: Vec<String>,
    pub steps: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngredientRef {
    pub ingredient_id: String,
    /// Free text, e.g. "400g".
    pub quantity: String,
}

/// Errors specific to recipe operations.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    /// The recipe vanished between the child-replacement commits. Fatal to
    /// the request, never retried here.
    #[error("Integrity error: {0}")]
    Integrity(String),
}

impl From<sea_orm::DbErr> for RecipeError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for RecipeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for recipes.
#[async_trait::async_trait]
pub trait RecipeService: Send + Sync {
    /// Creates a recipe with its full set of children.
    async fn create(
        &self,
        owner_user_id: &str,
        input: RecipeInput,
    ) -> Result<RecipeDetails, RecipeError>;

    /// Replaces the recipe's scalar fields and all three child collections.
    async fn update(&self, recipe_id: &str, input: RecipeInput)
    -> Result<RecipeDetails, RecipeError>;

    /// Removes the recipe and everything hanging off it.
    async fn delete(&self, recipe_id: &str) -> Result<(), RecipeError>;

    /// Absence is a `None`, not an error.
    async fn get_by_id(&self, recipe_id: &str) -> Result<Option<RecipeDetails>, RecipeError>;

    async fn list_all(&self) -> Result<Vec<RecipeDetails>, RecipeError>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<RecipeDetails>, RecipeError>;

    async fn list_by_category(&self, category_id: &str) -> Result<Vec<RecipeDetails>, RecipeError>;

    async fn list_by_ingredient(
        &self,
        ingredient_id: &str,
    ) -> Result<Vec<RecipeDetails>, RecipeError>;
}

/// Read-side join: reassembles a [`RecipeDetails`] from the recipe row, its
/// owner, name lookups and child rows. Pure so it can be exercised without a
/// store; steps are ordered by step number regardless of input order.
#[must_use]
pub fn compose_details(
    recipe: &recipes::Model,
    owner: &users::Model,
    ingredient_names: &HashMap<String, String>,
    category_names: &HashMap<String, String>,
    ingredient_links: &[recipe_ingredients::Model],
    category_links: &[recipe_categories::Model],
    steps: &[recipe_steps::Model],
) -> RecipeDetails {
    let ingredients = ingredient_links
        .iter()
        .map(|link| IngredientLine {
            ingredient_id: link.ingredient_id.clone(),
            name: ingredient_names
                .get(&link.ingredient_id)
                .cloned()
                .unwrap_or_default(),
            quantity: link.quantity.clone(),
        })
        .collect();

    let categories = category_links
        .iter()
        .map(|link| CategoryLine {
            category_id: link.category_id.clone(),
            name: category_names
                .get(&link.category_id)
                .cloned()
                .unwrap_or_default(),
        })
        .collect();

    let mut steps: Vec<StepLine> = steps
        .iter()
        .map(|s| StepLine {
            step_number: s.step_number,
            description: s.description.clone(),
        })
        .collect();
    steps.sort_by_key(|s| s.step_number);

    RecipeDetails {
        id: recipe.id.clone(),
        name: recipe.name.clone(),
        description: recipe.description.clone(),
        owner: RecipeOwner {
            id: owner.id.clone(),
            username: owner.username.clone(),
        },
        created_at: recipe.created_at.clone(),
        ingredients,
        categories,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_row() -> recipes::Model {
        recipes::Model {
            id: "r1".into(),
            name: "Pancakes".into(),
            description: "Fluffy".into(),
            owner_user_id: "u1".into(),
            created_at: "2026-03-01T00:00:00+00:00".into(),
        }
    }

    fn owner_row() -> users::Model {
        users::Model {
            id: "u1".into(),
            username: "alice".into(),
            password_hash: "irrelevant".into(),
            created_at: "2026-03-01T00:00:00+00:00".into(),
        }
    }

    #[test]
    fn composes_names_and_quantities() {
        let ingredient_names =
            HashMap::from([("i1".to_string(), "Flour".to_string())]);
        let category_names =
            HashMap::from([("c1".to_string(), "Dessert".to_string())]);
        let links = vec![recipe_ingredients::Model {
            recipe_id: "r1".into(),
            ingredient_id: "i1".into(),
            quantity: "2 cups".into(),
        }];
        let cats = vec![recipe_categories::Model {
            recipe_id: "r1".into(),
            category_id: "c1".into(),
        }];

        let details = compose_details(
            &recipe_row(),
            &owner_row(),
            &ingredient_names,
            &category_names,
            &links,
            &cats,
            &[],
        );

        assert_eq!(details.owner.username, "alice");
        assert_eq!(details.ingredients.len(), 1);
        assert_eq!(details.ingredients[0].name, "Flour");
        assert_eq!(details.ingredients[0].quantity, "2 cups");
        assert_eq!(details.categories[0].name, "Dessert");
    }

    #[test]
    fn orders_steps_by_step_number() {
        let steps = vec![
            recipe_steps::Model {
                id: "s2".into(),
                recipe_id: "r1".into(),
                step_number: 2,
                description: "Cook".into(),
            },
            recipe_steps::Model {
                id: "s1".into(),
                recipe_id: "r1".into(),
                step_number: 1,
                description: "Mix".into(),
            },
        ];

        let details = compose_details(
            &recipe_row(),
            &owner_row(),
            &HashMap::new(),
            &HashMap::new(),
            &[],
            &[],
            &steps,
        );

        let numbers: Vec<i32> = details.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(details.steps[0].description, "Mix");
    }
}
