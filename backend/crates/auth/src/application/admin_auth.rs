//! Admin Authorization Use Case
//!
//! Confirms the bearer of a verified token is an administrator. The role is
//! re-read from storage so a demotion takes effect before the token expires.

use std::str::FromStr;
use std::sync::Arc;

use kernel::claims::Claims;
use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct AdminAuthUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> AdminAuthUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, claims: &Claims) -> AuthResult<User> {
        let user_id = UserId::from_str(&claims.sub).map_err(|_| AuthError::TokenInvalid)?;

        let user = self
            .repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.user_role.is_admin() {
            return Err(AuthError::AdminRequired);
        }

        tracing::debug!(user_id = %user.user_id, "Admin authorization granted");

        Ok(user)
    }
}
