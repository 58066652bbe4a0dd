use axum_helpers::PageParams;
use chrono::Utc;
use domain_users::UserRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateItemRequest, ItemRequest, ItemRequestResponse, RequestItem};
use crate::repository::{RequestItemsSource, RequestRepository};

/// Service layer for item requests
#[derive(Clone)]
pub struct RequestService<R: RequestRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    items: Arc<dyn RequestItemsSource>,
}

impl<R: RequestRepository> RequestService<R> {
    pub fn new(
        repository: R,
        users: Arc<dyn UserRepository>,
        items: Arc<dyn RequestItemsSource>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            items,
        }
    }

    async fn ensure_user(&self, user_id: i64) -> RequestResult<()> {
        if self.users.exists(user_id).await? {
            Ok(())
        } else {
            Err(RequestError::UserNotFound(user_id))
        }
    }

    /// Attach answering items to each request in one batch lookup.
    async fn with_items(&self, requests: Vec<ItemRequest>) -> RequestResult<Vec<ItemRequestResponse>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let mut by_request: HashMap<i64, Vec<RequestItem>> = HashMap::new();
        for item in self.items.items_for_requests(&ids).await? {
            by_request.entry(item.request_id).or_default().push(item);
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let items = by_request.remove(&request.id).unwrap_or_default();
                ItemRequestResponse::new(request, items)
            })
            .collect())
    }

    #[instrument(skip(self, input))]
    pub async fn create_request(
        &self,
        user_id: i64,
        input: CreateItemRequest,
    ) -> RequestResult<ItemRequestResponse> {
        input
            .validate()
            .map_err(|e| RequestError::Validation(e.to_string()))?;
        self.ensure_user(user_id).await?;

        let request = self
            .repository
            .create(user_id, input.description, Utc::now().naive_utc())
            .await?;

        tracing::info!(request_id = request.id, requestor_id = user_id, "Created item request");
        Ok(ItemRequestResponse::new(request, Vec::new()))
    }

    #[instrument(skip(self))]
    pub async fn get_request(&self, user_id: i64, id: i64) -> RequestResult<ItemRequestResponse> {
        self.ensure_user(user_id).await?;

        let request = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(RequestError::NotFound(id))?;

        let mut responses = self.with_items(vec![request]).await?;
        responses.pop().ok_or(RequestError::NotFound(id))
    }

    pub async fn list_own_requests(
        &self,
        user_id: i64,
        page: PageParams,
    ) -> RequestResult<Vec<ItemRequestResponse>> {
        self.ensure_user(user_id).await?;
        let requests = self.repository.list_by_requestor(user_id, page).await?;
        self.with_items(requests).await
    }

    pub async fn list_other_requests(
        &self,
        user_id: i64,
        page: PageParams,
    ) -> RequestResult<Vec<ItemRequestResponse>> {
        self.ensure_user(user_id).await?;
        let requests = self.repository.list_by_others(user_id, page).await?;
        self.with_items(requests).await
    }
}
