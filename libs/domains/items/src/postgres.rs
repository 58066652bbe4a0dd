use async_trait::async_trait;
use axum_helpers::PageParams;
use database::BaseRepository;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    entity::{comment, item},
    error::{ItemError, ItemResult},
    models::{Comment, Item, NewComment, NewItem},
    repository::ItemRepository,
};

pub struct PgItemRepository {
    items: BaseRepository<item::Entity>,
    comments: BaseRepository<comment::Entity>,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            items: BaseRepository::new(db.clone()),
            comments: BaseRepository::new(db),
        }
    }
}

fn db_error(err: DbErr) -> ItemError {
    ItemError::Internal(format!("Database error: {}", err))
}

/// `%text%` with `\`, `%` and `_` escaped so ILIKE matches `text` literally.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, input: NewItem) -> ItemResult<Item> {
        let active_model = item::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            available: Set(input.available),
            owner_id: Set(input.owner_id),
            request_id: Set(input.request_id),
        };

        let model = self.items.insert(active_model).await.map_err(db_error)?;
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = self.items.find_by_id(id).await.map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn get_by_ids(&self, ids: &[i64]) -> ItemResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = item::Entity::find()
            .filter(item::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(item::Column::Id)
            .all(self.items.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, updated: Item) -> ItemResult<Item> {
        let id = updated.id;
        let active_model = item::ActiveModel {
            id: Set(updated.id),
            name: Set(updated.name),
            description: Set(updated.description),
            available: Set(updated.available),
            owner_id: Set(updated.owner_id),
            request_id: Set(updated.request_id),
        };

        let model = self.items.update(active_model).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ItemError::NotFound(id),
            other => db_error(other),
        })?;

        Ok(model.into())
    }

    async fn list_by_owner(&self, owner_id: i64, page: PageParams) -> ItemResult<Vec<Item>> {
        let models = item::Entity::find()
            .filter(item::Column::OwnerId.eq(owner_id))
            .order_by_asc(item::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.items.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn ids_by_owner(&self, owner_id: i64) -> ItemResult<Vec<i64>> {
        let ids = item::Entity::find()
            .select_only()
            .column(item::Column::Id)
            .filter(item::Column::OwnerId.eq(owner_id))
            .order_by_asc(item::Column::Id)
            .into_tuple::<i64>()
            .all(self.items.db())
            .await
            .map_err(db_error)?;

        Ok(ids)
    }

    async fn search(&self, text: &str, page: PageParams) -> ItemResult<Vec<Item>> {
        let pattern = like_pattern(text);
        let models = item::Entity::find()
            .filter(item::Column::Available.eq(true))
            .filter(Expr::cust_with_values(
                "(name ILIKE $1 OR description ILIKE $2)",
                [pattern.clone(), pattern],
            ))
            .order_by_asc(item::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.items.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_requests(&self, request_ids: &[i64]) -> ItemResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = item::Entity::find()
            .filter(item::Column::RequestId.is_in(request_ids.iter().copied()))
            .order_by_asc(item::Column::Id)
            .all(self.items.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn add_comment(&self, input: NewComment) -> ItemResult<Comment> {
        let active_model = comment::ActiveModel {
            id: NotSet,
            text: Set(input.text),
            item_id: Set(input.item_id),
            author_id: Set(input.author_id),
            created: Set(input.created),
        };

        let model = self.comments.insert(active_model).await.map_err(db_error)?;
        Ok(model.into())
    }

    async fn comments_for_items(&self, item_ids: &[i64]) -> ItemResult<Vec<Comment>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = comment::Entity::find()
            .filter(comment::Column::ItemId.is_in(item_ids.iter().copied()))
            .order_by_asc(comment::Column::Created)
            .order_by_asc(comment::Column::Id)
            .all(self.comments.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("book"), "%book%");
        assert_eq!(like_pattern(" book"), "% book%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("t_2"), "%t\\_2%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
