//! Auth Error Types
//!
//! Gateway-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use http::header::{HeaderName, HeaderValue};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Set on every 401 so clients can tell "log in again" from other failures.
pub const AUTH_REQUIRED_HEADER: HeaderName = HeaderName::from_static("x-auth-required");

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email already registered
    #[error("An account with this email already exists")]
    EmailTaken,

    /// Unknown email or wrong password (never says which)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No `Authorization: Bearer` header
    #[error("Authentication required")]
    TokenMissing,

    /// Bad signature, wrong shape, or unreadable claims
    #[error("Invalid bearer token")]
    TokenInvalid,

    #[error("Bearer token has expired")]
    TokenExpired,

    /// Authenticated, but not an administrator
    #[error("Administrator role required")]
    AdminRequired,

    #[error("User not found")]
    UserNotFound,

    /// Input rejected by a value object; carries its user-facing hint
    #[error("{0}")]
    Validation(AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::AdminRequired => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Validation(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::AdminRequired => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Validation(e) => e.kind(),
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// True for the variants the bearer gate produces.
    pub fn requires_authentication(&self) -> bool {
        matches!(
            self,
            AuthError::TokenMissing | AuthError::TokenInvalid | AuthError::TokenExpired
        )
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(e) => e,
            AuthError::EmailTaken => AppError::conflict(self.to_string())
                .with_action("Log in instead, or register with a different email"),
            AuthError::TokenExpired => {
                AppError::unauthorized(self.to_string()).with_action("Please log in again")
            }
            // Never leak driver details to clients
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("An internal error occurred")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Rejected bearer token");
            }
            AuthError::AdminRequired => {
                tracing::warn!("Non-admin attempted admin authorization");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let auth_required = self.requires_authentication();
        let mut response = self.into_app_error().into_response();
        if auth_required {
            response
                .headers_mut()
                .insert(AUTH_REQUIRED_HEADER, HeaderValue::from_static("true"));
        }
        response
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err)
        }
    }
}

impl From<platform::bearer::BearerError> for AuthError {
    fn from(err: platform::bearer::BearerError) -> Self {
        match err {
            platform::bearer::BearerError::Missing => AuthError::TokenMissing,
            platform::bearer::BearerError::InvalidScheme => AuthError::TokenInvalid,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

        match err.kind() {
            JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
            JwtErrorKind::InvalidKeyFormat | JwtErrorKind::Crypto(_) => {
                AuthError::Internal(err.to_string())
            }
            _ => AuthError::TokenInvalid,
        }
    }
}
