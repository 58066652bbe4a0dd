use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User};

/// Repository trait for User persistence
///
/// Email uniqueness is enforced here: `create` and `update` fail with
/// [`UserError::DuplicateEmail`] when another user already holds the address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Users with the given ids; unknown ids are skipped.
    async fn get_by_ids(&self, ids: &[i64]) -> UserResult<Vec<User>>;

    /// All users ordered by id.
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Persist every field of `user`.
    async fn update(&self, user: User) -> UserResult<User>;

    async fn delete(&self, id: i64) -> UserResult<bool>;

    async fn exists(&self, id: i64) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<i64, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &BTreeMap<i64, User>, email: &str, except: Option<i64>) -> bool {
    users
        .values()
        .any(|u| Some(u.id) != except && u.email == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if email_taken(&users, &input.email, None) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let id = users.keys().next_back().map_or(1, |last| last + 1);
        let user = User {
            id,
            name: input.name,
            email: input.email,
        };
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_ids(&self, ids: &[i64]) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }
        if email_taken(&users, &user.email, Some(user.id)) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn exists(&self, id: i64) -> UserResult<bool> {
        Ok(self.users.read().await.contains_key(&id))
    }
}
