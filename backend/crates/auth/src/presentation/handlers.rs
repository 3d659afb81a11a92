//! HTTP Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Extension, Json};
use kernel::claims::Claims;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{
    AdminAuthUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AdminAuthResponse, LoginRequest, ProfileResponse, RegisterRequest, TokenResponse,
};

/// Where `GET /api/user` sends the caller
pub const PROFILE_PATH: &str = "/api/user/profile";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = TokenIssuer::new(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/user/register (also POST /api/user)
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<TokenResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            success: true,
            token: output.token.token,
            message: "Registration successful".to_string(),
            expires_at: output.token.expires_at,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/user/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        success: true,
        token: output.token.token,
        message: "Login successful".to_string(),
        expires_at: output.token.expires_at,
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/user
pub async fn user_root() -> Redirect {
    Redirect::to(PROFILE_PATH)
}

/// GET /api/user/profile (behind `require_bearer`)
pub async fn profile(Extension(claims): Extension<Claims>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "get profile",
        payload: claims,
    })
}

// ============================================================================
// Admin Auth
// ============================================================================

/// GET /api/admin-auth (behind `require_bearer`)
pub async fn admin_auth<R>(
    State(state): State<AuthAppState<R>>,
    Extension(claims): Extension<Claims>,
) -> AuthResult<Json<AdminAuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = AdminAuthUseCase::new(state.repo.clone())
        .execute(&claims)
        .await?;

    Ok(Json(AdminAuthResponse {
        success: true,
        admin: true,
        message: format!("{} is authorized as admin", user.email),
    }))
}
