//! `SeaORM` implementation of the `CategoryService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::services::category_service::{CategoryDto, CategoryError, CategoryService};

const MAX_NAME_LEN: usize = 100;

pub struct SeaOrmCategoryService {
    store: Store,
}

impl SeaOrmCategoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn validate_name(name: &str) -> Result<(), CategoryError> {
        if name.trim().is_empty() {
            return Err(CategoryError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CategoryError::Validation(format!(
                "Category name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryService for SeaOrmCategoryService {
    async fn create(&self, name: &str) -> Result<CategoryDto, CategoryError> {
        Self::validate_name(name)?;

        if self.store.category_name_exists(name).await? {
            return Err(CategoryError::Conflict(format!(
                "Category with name '{name}' already exists"
            )));
        }

        let category = self.store.insert_category(name).await?;
        Ok(CategoryDto::from(category))
    }

    async fn update(&self, id: &str, name: &str) -> Result<CategoryDto, CategoryError> {
        if self.store.get_category(id).await?.is_none() {
            return Err(CategoryError::NotFound("Category not found".into()));
        }

        Self::validate_name(name)?;

        if let Some(existing) = self.store.get_category_by_name(name).await?
            && existing.id != id
        {
            return Err(CategoryError::Conflict(format!(
                "Category with name '{name}' already exists"
            )));
        }

        let category = self.store.update_category_name(id, name).await?;
        Ok(CategoryDto::from(category))
    }

    async fn delete(&self, id: &str) -> Result<(), CategoryError> {
        if self.store.get_category(id).await?.is_none() {
            return Err(CategoryError::NotFound("Category not found".into()));
        }

        self.store.delete_category(id).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<CategoryDto>, CategoryError> {
        Ok(self.store.get_category(id).await?.map(CategoryDto::from))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<CategoryDto>, CategoryError> {
        Ok(self
            .store
            .get_category_by_name(name)
            .await?
            .map(CategoryDto::from))
    }

    async fn list_all(&self) -> Result<Vec<CategoryDto>, CategoryError> {
        let rows = self.store.list_categories().await?;
        Ok(rows.into_iter().map(CategoryDto::from).collect())
    }
}
