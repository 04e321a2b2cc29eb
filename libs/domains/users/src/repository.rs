use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// `create` must reject duplicate usernames and emails with
/// [`UserError::UsernameTaken`] / [`UserError::EmailTaken`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> UserResult<User>;

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn find_by_verification_token(&self, token: &str) -> UserResult<Option<User>>;

    /// Replace the stored user with the same id
    async fn update(&self, user: User) -> UserResult<User>;

    /// Returns whether a user was removed
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// In-memory user store for tests
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_by<F>(&self, predicate: F) -> Option<User>
    where
        F: Fn(&User) -> bool,
    {
        self.users.read().await.values().find(|u| predicate(u)).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameTaken);
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailTaken);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        Ok(self.find_by(|u| u.username == username).await)
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.find_by(|u| u.email == email).await)
    }

    async fn find_by_verification_token(&self, token: &str) -> UserResult<Option<User>> {
        Ok(self
            .find_by(|u| u.email_verification_token.as_deref() == Some(token))
            .await)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;
        let slot = users.get_mut(&user.id).ok_or(UserError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}
