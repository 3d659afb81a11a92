//! Login Use Case
//!
//! Exchanges email + password for a bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{IssuedToken, TokenIssuer};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub token: IssuedToken,
}

pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenIssuer>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            repo,
            config,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // A malformed email cannot belong to an account
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_login(input.password);
        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { user, token })
    }
}
