use axum_helpers::validation::not_blank;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A registered user. Also the wire shape of every user response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    /// Apply a partial update; absent fields keep their value.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub name: String,
    #[validate(email(message = "must be a well-formed email address"), length(max = 512))]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub name: Option<String>,
    #[validate(email(message = "must be a well-formed email address"), length(max = 512))]
    pub email: Option<String>,
}
