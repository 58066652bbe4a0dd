use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self.repository.create(input).await?;
        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let mut user = self.get_user(id).await?;
        user.apply_update(input);

        let user = self.repository.update(user).await?;
        tracing::info!(user_id = id, "Updated user");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }
}
