//! Generic CRUD over a SeaORM entity keyed by a `BIGSERIAL` id.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, SqlErr,
};
use std::marker::PhantomData;

/// Shared plumbing behind every `Pg*Repository`.
///
/// Domain repositories embed one of these for single-row operations and use
/// [`db`](Self::db) for their own filtered queries.
pub struct BaseRepository<E>
where
    E: EntityTrait,
{
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    /// Insert and return the stored row, including its generated id.
    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    /// Update the columns set on `model`; fails with `RecordNotUpdated` when the row is gone.
    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(&self.db).await
    }

    /// Returns the number of deleted rows (0 or 1).
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

/// True when `err` is a unique constraint violation, e.g. a duplicate email.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
        assert!(!is_unique_violation(&DbErr::RecordNotFound("users".to_string())));
    }
}
