use axum_helpers::validation::not_blank;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: NaiveDateTime,
}

/// An item offered in answer to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: i64,
    pub owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestResponse {
    pub id: i64,
    pub description: String,
    #[schema(value_type = String, example = "2030-01-01T10:00:00")]
    pub created: NaiveDateTime,
    pub items: Vec<RequestItem>,
}

impl ItemRequestResponse {
    pub fn new(request: ItemRequest, items: Vec<RequestItem>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(custom(function = "not_blank"))]
    pub description: String,
}
