//! `SeaORM` implementation of the `IngredientService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::services::ingredient_service::{IngredientDto, IngredientError, IngredientService};

const MAX_NAME_LEN: usize = 100;

pub struct SeaOrmIngredientService {
    store: Store,
}

impl SeaOrmIngredientService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn validate_name(name: &str) -> Result<(), IngredientError> {
        if name.trim().is_empty() {
            return Err(IngredientError::Validation(
                "Ingredient name cannot be empty".into(),
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(IngredientError::Validation(format!(
                "Ingredient name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl IngredientService for SeaOrmIngredientService {
    async fn create(&self, name: &str) -> Result<IngredientDto, IngredientError> {
        Self::validate_name(name)?;

        if self.store.ingredient_name_exists(name).await? {
            return Err(IngredientError::Conflict(format!(
                "Ingredient with name '{name}' already exists"
            )));
        }

        let ingredient = self.store.insert_ingredient(name).await?;
        Ok(IngredientDto::from(ingredient))
    }

    async fn get_or_create(&self, name: &str) -> Result<IngredientDto, IngredientError> {
        if let Some(existing) = self.store.get_ingredient_by_name(name).await? {
            return Ok(IngredientDto::from(existing));
        }

        self.create(name).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<IngredientDto>, IngredientError> {
        Ok(self.store.get_ingredient(id).await?.map(IngredientDto::from))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<IngredientDto>, IngredientError> {
        Ok(self
            .store
            .get_ingredient_by_name(name)
            .await?
            .map(IngredientDto::from))
    }

    async fn list_all(&self) -> Result<Vec<IngredientDto>, IngredientError> {
        let rows = self.store.list_ingredients().await?;
        Ok(rows.into_iter().map(IngredientDto::from).collect())
    }
}
