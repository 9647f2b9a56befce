//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::db::repositories::user::hash_password;
use crate::services::user_service::{UserDto, UserError, UserService};

const MAX_USERNAME_LEN: usize = 100;

pub struct SeaOrmUserService {
    store: Store,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn register(&self, username: &str, password: &str) -> Result<UserDto, UserError> {
        if username.trim().is_empty() {
            return Err(UserError::Validation("Username cannot be empty".into()));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(UserError::Validation(format!(
                "Username cannot exceed {MAX_USERNAME_LEN} characters"
            )));
        }
        if password.trim().is_empty() {
            return Err(UserError::Validation("Password cannot be empty".into()));
        }

        if self.store.username_exists(username).await? {
            return Err(UserError::Conflict(format!(
                "Username '{username}' already exists"
            )));
        }

        let user = self
            .store
            .insert_user(username, &hash_password(password))
            .await?;

        Ok(UserDto::from(user))
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserDto>, UserError> {
        let Some(user) = self.store.get_user_by_username(username).await? else {
            return Ok(None);
        };

        if user.password_hash == hash_password(password) {
            Ok(Some(UserDto::from(user)))
        } else {
            Ok(None)
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<UserDto>, UserError> {
        Ok(self.store.get_user(id).await?.map(UserDto::from))
    }

    async fn list_all(&self) -> Result<Vec<UserDto>, UserError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}
