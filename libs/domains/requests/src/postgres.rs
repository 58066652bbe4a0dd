use async_trait::async_trait;
use axum_helpers::PageParams;
use chrono::NaiveDateTime;
use database::BaseRepository;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};

use crate::{
    entity,
    error::{RequestError, RequestResult},
    models::ItemRequest,
    repository::RequestRepository,
};

pub struct PgRequestRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn fetch_page(
        &self,
        query: Select<entity::Entity>,
        page: PageParams,
    ) -> RequestResult<Vec<ItemRequest>> {
        let models = query
            .order_by_desc(entity::Column::Created)
            .order_by_desc(entity::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

fn db_error(err: DbErr) -> RequestError {
    RequestError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(
        &self,
        requestor_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> RequestResult<ItemRequest> {
        let active_model = entity::ActiveModel {
            id: NotSet,
            description: Set(description),
            requestor_id: Set(requestor_id),
            created: Set(created),
        };

        let model = self.base.insert(active_model).await.map_err(db_error)?;
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>> {
        let model = self.base.find_by_id(id).await.map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn exists(&self, id: i64) -> RequestResult<bool> {
        Ok(self.get_by_id(id).await?.is_some())
    }

    async fn list_by_requestor(
        &self,
        requestor_id: i64,
        page: PageParams,
    ) -> RequestResult<Vec<ItemRequest>> {
        let query = entity::Entity::find().filter(entity::Column::RequestorId.eq(requestor_id));
        self.fetch_page(query, page).await
    }

    async fn list_by_others(
        &self,
        requestor_id: i64,
        page: PageParams,
    ) -> RequestResult<Vec<ItemRequest>> {
        let query = entity::Entity::find().filter(entity::Column::RequestorId.ne(requestor_id));
        self.fetch_page(query, page).await
    }
}
