use axum_helpers::PageParams;
use chrono::Utc;
use domain_bookings::BookingRepository;
use domain_requests::RequestRepository;
use domain_users::UserRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::catalog::ItemCatalog;
use crate::error::{ItemError, ItemResult};
use crate::models::{
    CommentResponse, CreateComment, CreateItem, Item, ItemResponse, NewComment, NewItem,
    UpdateItem,
};
use crate::repository::ItemRepository;

/// Service layer for the item catalog and comments
#[derive(Clone)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    requests: Arc<dyn RequestRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(
        repository: R,
        users: Arc<dyn UserRepository>,
        requests: Arc<dyn RequestRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            requests,
            bookings,
        }
    }

    /// Read-only view of the same storage for the bookings and requests domains.
    pub fn catalog(&self) -> ItemCatalog<R> {
        ItemCatalog::new(Arc::clone(&self.repository))
    }

    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, user_id: i64, input: CreateItem) -> ItemResult<ItemResponse> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        if !self.users.exists(user_id).await? {
            return Err(ItemError::UserNotFound(user_id));
        }

        let request_id = match input.request_id {
            Some(id) if self.requests.exists(id).await? => Some(id),
            _ => None,
        };

        let item = self
            .repository
            .create(NewItem {
                owner_id: user_id,
                name: input.name,
                description: input.description.unwrap_or_default(),
                available: input.available.unwrap_or_default(),
                request_id,
            })
            .await?;

        tracing::info!(item_id = item.id, owner_id = user_id, "Created item");
        self.expand_one(item, user_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, user_id: i64, id: i64) -> ItemResult<ItemResponse> {
        let item = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        self.expand_one(item, user_id).await
    }

    /// Partially update an item. Callers other than the owner see `NotFound`.
    #[instrument(skip(self, input), fields(item_id = %id))]
    pub async fn update_item(
        &self,
        user_id: i64,
        id: i64,
        input: UpdateItem,
    ) -> ItemResult<ItemResponse> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let mut item = self
            .repository
            .get_by_id(id)
            .await?
            .filter(|item| item.owner_id == user_id)
            .ok_or(ItemError::NotFound(id))?;

        item.apply_update(input);
        let item = self.repository.update(item).await?;

        tracing::info!(item_id = id, "Updated item");
        self.expand_one(item, user_id).await
    }

    pub async fn list_own_items(
        &self,
        user_id: i64,
        page: PageParams,
    ) -> ItemResult<Vec<ItemResponse>> {
        let items = self.repository.list_by_owner(user_id, page).await?;
        self.expand(items, user_id).await
    }

    /// Available items matching `text`; blank text finds nothing.
    pub async fn search(
        &self,
        user_id: i64,
        text: Option<&str>,
        page: PageParams,
    ) -> ItemResult<Vec<ItemResponse>> {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Ok(Vec::new());
        };

        let items = self.repository.search(text, page).await?;
        self.expand(items, user_id).await
    }

    /// Comment on an item the caller has finished an approved booking of.
    #[instrument(skip(self, input), fields(item_id = %item_id))]
    pub async fn add_comment(
        &self,
        user_id: i64,
        item_id: i64,
        input: CreateComment,
    ) -> ItemResult<CommentResponse> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        if self.repository.get_by_id(item_id).await?.is_none() {
            return Err(ItemError::NotFound(item_id));
        }

        let author = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(ItemError::UserNotFound(user_id))?;

        let now = Utc::now().naive_utc();
        if !self
            .bookings
            .has_finished_approved(user_id, item_id, now)
            .await?
        {
            return Err(ItemError::Validation("There was no booking".to_string()));
        }

        let comment = self
            .repository
            .add_comment(NewComment {
                item_id,
                author_id: user_id,
                text: input.text,
                created: now,
            })
            .await?;

        tracing::info!(comment_id = comment.id, item_id, author_id = user_id, "Added comment");
        Ok(CommentResponse::new(comment, author.name))
    }

    async fn expand_one(&self, item: Item, viewer_id: i64) -> ItemResult<ItemResponse> {
        let id = item.id;
        self.expand(vec![item], viewer_id)
            .await?
            .pop()
            .ok_or(ItemError::NotFound(id))
    }

    /// Attach comments to every item, and the last/next approved bookings to
    /// those owned by `viewer_id`.
    async fn expand(&self, items: Vec<Item>, viewer_id: i64) -> ItemResult<Vec<ItemResponse>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let item_ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        let comments = self.repository.comments_for_items(&item_ids).await?;

        let mut author_ids: Vec<i64> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors: HashMap<i64, String> = self
            .users
            .get_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.name))
            .collect();

        let mut by_item: HashMap<i64, Vec<CommentResponse>> = HashMap::new();
        for comment in comments {
            let author_name = authors.get(&comment.author_id).cloned().unwrap_or_default();
            by_item
                .entry(comment.item_id)
                .or_default()
                .push(CommentResponse::new(comment, author_name));
        }

        let now = Utc::now().naive_utc();
        let mut responses = Vec::with_capacity(items.len());
        for item in items {
            let owned = item.owner_id == viewer_id;
            let item_id = item.id;
            let comments = by_item.remove(&item_id).unwrap_or_default();
            let mut response = ItemResponse::new(item, comments);

            if owned {
                response.last_booking = self
                    .bookings
                    .last_approved_before(item_id, now)
                    .await?
                    .map(Into::into);
                response.next_booking = self
                    .bookings
                    .next_approved_after(item_id, now)
                    .await?
                    .map(Into::into);
            }
            responses.push(response);
        }

        Ok(responses)
    }
}
