use async_trait::async_trait;
use axum_helpers::PageParams;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{Comment, Item, NewComment, NewItem};

/// Repository trait for items and their comments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, input: NewItem) -> ItemResult<Item>;

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    async fn get_by_ids(&self, ids: &[i64]) -> ItemResult<Vec<Item>>;

    async fn update(&self, item: Item) -> ItemResult<Item>;

    /// Items of `owner_id` ordered by id.
    async fn list_by_owner(&self, owner_id: i64, page: PageParams) -> ItemResult<Vec<Item>>;

    async fn ids_by_owner(&self, owner_id: i64) -> ItemResult<Vec<i64>>;

    /// Available items whose name or description contains `text`, ignoring
    /// case, ordered by id.
    async fn search(&self, text: &str, page: PageParams) -> ItemResult<Vec<Item>>;

    /// Items answering any of `request_ids`.
    async fn list_by_requests(&self, request_ids: &[i64]) -> ItemResult<Vec<Item>>;

    async fn add_comment(&self, input: NewComment) -> ItemResult<Comment>;

    /// Comments on any of `item_ids`, oldest first.
    async fn comments_for_items(&self, item_ids: &[i64]) -> ItemResult<Vec<Comment>>;
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<BTreeMap<i64, Item>>>,
    comments: Arc<RwLock<BTreeMap<i64, Comment>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn matching(&self, keep: impl Fn(&Item) -> bool) -> Vec<Item> {
        self.items
            .read()
            .await
            .values()
            .filter(|item| keep(*item))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, input: NewItem) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        let id = items.keys().next_back().map_or(1, |last| last + 1);

        let item = Item {
            id,
            name: input.name,
            description: input.description,
            available: input.available,
            owner_id: input.owner_id,
            request_id: input.request_id,
        };
        items.insert(id, item.clone());
        Ok(item)
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn get_by_ids(&self, ids: &[i64]) -> ItemResult<Vec<Item>> {
        Ok(self.matching(|item| ids.contains(&item.id)).await)
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.id) {
            Some(stored) => {
                *stored = item.clone();
                Ok(item)
            }
            None => Err(ItemError::NotFound(item.id)),
        }
    }

    async fn list_by_owner(&self, owner_id: i64, page: PageParams) -> ItemResult<Vec<Item>> {
        Ok(page.apply(self.matching(|item| item.owner_id == owner_id).await))
    }

    async fn ids_by_owner(&self, owner_id: i64) -> ItemResult<Vec<i64>> {
        let owned = self.matching(|item| item.owner_id == owner_id).await;
        Ok(owned.into_iter().map(|item| item.id).collect())
    }

    async fn search(&self, text: &str, page: PageParams) -> ItemResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let found = self
            .matching(|item| {
                item.available
                    && (item.name.to_lowercase().contains(&needle)
                        || item.description.to_lowercase().contains(&needle))
            })
            .await;
        Ok(page.apply(found))
    }

    async fn list_by_requests(&self, request_ids: &[i64]) -> ItemResult<Vec<Item>> {
        Ok(self
            .matching(|item| item.request_id.is_some_and(|id| request_ids.contains(&id)))
            .await)
    }

    async fn add_comment(&self, input: NewComment) -> ItemResult<Comment> {
        let mut comments = self.comments.write().await;
        let id = comments.keys().next_back().map_or(1, |last| last + 1);

        let comment = Comment {
            id,
            text: input.text,
            item_id: input.item_id,
            author_id: input.author_id,
            created: input.created,
        };
        comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn comments_for_items(&self, item_ids: &[i64]) -> ItemResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        let mut found: Vec<Comment> = comments
            .values()
            .filter(|c| item_ids.contains(&c.item_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(found)
    }
}
