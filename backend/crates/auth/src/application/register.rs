//! Register Use Case
//!
//! Creates a customer account and signs the caller in.

use std::sync::Arc;

use kernel::error::app_error::AppError;

use crate::application::config::AuthConfig;
use crate::application::token::{IssuedToken, TokenIssuer};
use crate::domain::entity::user::{DISPLAY_NAME_MAX_LENGTH, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
    pub token: IssuedToken,
}

pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenIssuer>,
}

impl<R> RegisterUseCase<R>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email = Email::new(&input.email)?;
        let display_name = normalize_display_name(input.name)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(email, display_name, password_hash);
        // The unique index still decides if two registrations race
        self.repo.create(&user).await?;

        let token = self.tokens.issue(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            email_domain = %user.email.domain(),
            "User registered"
        );

        Ok(RegisterOutput { user, token })
    }
}

fn normalize_display_name(name: Option<String>) -> AuthResult<Option<String>> {
    let Some(name) = name else {
        return Ok(None);
    };

    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > DISPLAY_NAME_MAX_LENGTH {
        return Err(AppError::bad_request(format!(
            "Name must be at most {DISPLAY_NAME_MAX_LENGTH} characters"
        ))
        .into());
    }
    if trimmed.chars().any(char::is_control) {
        return Err(AppError::bad_request("Name contains invalid characters").into());
    }

    Ok(Some(trimmed.to_string()))
}
