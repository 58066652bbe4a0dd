use async_trait::async_trait;
use domain_bookings::{BookableItems, BookedItem, BookingError, BookingResult};
use domain_requests::{RequestError, RequestItem, RequestItemsSource, RequestResult};
use std::sync::Arc;

use crate::models::Item;
use crate::repository::ItemRepository;

/// Item lookups on behalf of the bookings and requests domains.
pub struct ItemCatalog<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemCatalog<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R: ItemRepository> Clone for ItemCatalog<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn booked(item: Item) -> BookedItem {
    BookedItem {
        id: item.id,
        name: item.name,
        description: item.description,
        available: item.available,
        request_id: item.request_id,
        owner_id: item.owner_id,
    }
}

#[async_trait]
impl<R: ItemRepository> BookableItems for ItemCatalog<R> {
    async fn get_item(&self, id: i64) -> BookingResult<Option<BookedItem>> {
        let item = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?;
        Ok(item.map(booked))
    }

    async fn items_by_ids(&self, ids: &[i64]) -> BookingResult<Vec<BookedItem>> {
        let items = self
            .repository
            .get_by_ids(ids)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?;
        Ok(items.into_iter().map(booked).collect())
    }

    async fn item_ids_by_owner(&self, owner_id: i64) -> BookingResult<Vec<i64>> {
        self.repository
            .ids_by_owner(owner_id)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))
    }
}

#[async_trait]
impl<R: ItemRepository> RequestItemsSource for ItemCatalog<R> {
    async fn items_for_requests(&self, request_ids: &[i64]) -> RequestResult<Vec<RequestItem>> {
        let items = self
            .repository
            .list_by_requests(request_ids)
            .await
            .map_err(|e| RequestError::Internal(e.to_string()))?;

        Ok(items
            .into_iter()
            .filter_map(|item| {
                Some(RequestItem {
                    request_id: item.request_id?,
                    id: item.id,
                    name: item.name,
                    description: item.description,
                    available: item.available,
                    owner_id: item.owner_id,
                })
            })
            .collect())
    }
}
