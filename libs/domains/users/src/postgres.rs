use async_trait::async_trait;
use database::{BaseRepository, is_unique_violation};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{CreateUser, User},
    repository::UserRepository,
};

pub struct PgUserRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn map_write_error(err: DbErr, email: &str) -> UserError {
    if is_unique_violation(&err) {
        UserError::DuplicateEmail(email.to_string())
    } else {
        UserError::Internal(format!("Database error: {}", err))
    }
}

fn db_error(err: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let active_model = entity::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email.clone()),
        };

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| map_write_error(e, &input.email))?;

        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let model = self.base.find_by_id(id).await.map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn get_by_ids(&self, ids: &[i64]) -> UserResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::Entity::find()
            .filter(entity::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let active_model = entity::ActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email.clone()),
        };

        let model = self.base.update(active_model).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => UserError::NotFound(user.id),
            other => map_write_error(other, &user.email),
        })?;

        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(db_error)?;
        Ok(rows_affected > 0)
    }

    async fn exists(&self, id: i64) -> UserResult<bool> {
        Ok(self.get_by_id(id).await?.is_some())
    }
}
