//! In-Memory Repository Implementation
//!
//! Used when no `DATABASE_URL` is configured, and by tests.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        // Checked under the write lock, same guarantee as a unique index
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.read().await.values().any(|u| &u.email == email))
    }
}
