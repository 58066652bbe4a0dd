use async_trait::async_trait;
use axum_helpers::PageParams;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::RequestResult;
use crate::models::{ItemRequest, RequestItem};

/// Repository trait for ItemRequest persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn create(
        &self,
        requestor_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> RequestResult<ItemRequest>;

    async fn get_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>>;

    async fn exists(&self, id: i64) -> RequestResult<bool>;

    /// Requests posted by `requestor_id`, newest first.
    async fn list_by_requestor(
        &self,
        requestor_id: i64,
        page: PageParams,
    ) -> RequestResult<Vec<ItemRequest>>;

    /// Requests posted by everyone except `requestor_id`, newest first.
    async fn list_by_others(
        &self,
        requestor_id: i64,
        page: PageParams,
    ) -> RequestResult<Vec<ItemRequest>>;
}

/// Items answering requests, provided by the item catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestItemsSource: Send + Sync {
    /// Every item whose `requestId` is one of `request_ids`.
    async fn items_for_requests(&self, request_ids: &[i64]) -> RequestResult<Vec<RequestItem>>;
}

/// In-memory implementation of RequestRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryRequestRepository {
    requests: Arc<RwLock<BTreeMap<i64, ItemRequest>>>,
}

impl InMemoryRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn newest_first(&self, keep: impl Fn(&ItemRequest) -> bool) -> Vec<ItemRequest> {
        let requests = self.requests.read().await;
        let mut result: Vec<ItemRequest> = requests.values().filter(|r| keep(*r)).cloned().collect();
        result.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        result
    }
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn create(
        &self,
        requestor_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> RequestResult<ItemRequest> {
        let mut requests = self.requests.write().await;
        let id = requests.keys().next_back().map_or(1, |last| last + 1);

        let request = ItemRequest {
            id,
            description,
            requestor_id,
            created,
        };
        requests.insert(id, request.clone());
        Ok(request)
    }

    async fn get_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> RequestResult<bool> {
        Ok(self.requests.read().await.contains_key(&id))
    }

    async fn list_by_requestor(
        &self,
        requestor_id: i64,
        page: PageParams,
    ) -> RequestResult<Vec<ItemRequest>> {
        let rows = self.newest_first(|r| r.requestor_id == requestor_id).await;
        Ok(page.apply(rows))
    }

    async fn list_by_others(
        &self,
        requestor_id: i64,
        page: PageParams,
    ) -> RequestResult<Vec<ItemRequest>> {
        let rows = self.newest_first(|r| r.requestor_id != requestor_id).await;
        Ok(page.apply(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_own_requests_newest_first() {
        let repo = InMemoryRequestRepository::new();
        let old = repo.create(1, "ladder".into(), at(8)).await.unwrap();
        let new = repo.create(1, "drill".into(), at(9)).await.unwrap();
        repo.create(2, "saw".into(), at(10)).await.unwrap();

        let own = repo.list_by_requestor(1, PageParams::default()).await.unwrap();
        assert_eq!(own, vec![new, old]);
    }

    #[tokio::test]
    async fn test_others_excludes_caller_and_pages() {
        let repo = InMemoryRequestRepository::new();
        repo.create(1, "mine".into(), at(8)).await.unwrap();
        for i in 0..3 {
            repo.create(2, format!("theirs {}", i), at(9) + Duration::minutes(i))
                .await
                .unwrap();
        }

        let page = repo.list_by_others(1, PageParams::new(1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].description, "theirs 1");
    }

    #[tokio::test]
    async fn test_exists() {
        let repo = InMemoryRequestRepository::new();
        let request = repo.create(1, "tent".into(), at(8)).await.unwrap();

        assert!(repo.exists(request.id).await.unwrap());
        assert!(!repo.exists(request.id + 1).await.unwrap());
    }
}
