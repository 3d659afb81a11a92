//! Auth Gateway
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository trait
//! - `application/` - Use cases, token issuing, configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, bearer middleware, routers
//!
//! ## Endpoints
//! - `POST /api/user/register` (and `POST /api/user`) - create account, returns token
//! - `POST /api/user/login` - returns token
//! - `GET /api/user/profile` - bearer; echoes the verified claims
//! - `GET /api/admin-auth` - bearer; 403 unless the user is an admin
//! - `/api/orders/*` - bearer; delegated to the orders router
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B policy)
//! - Stateless HS256 bearer tokens carrying [`kernel::claims::Claims`]
//! - Protected routes reject missing, invalid, or expired tokens before the
//!   handler runs

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{AuthConfig, MAX_TOKEN_TTL};
pub use application::token::TokenIssuer;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryUserRepository, postgres::PgUserRepository};
pub use presentation::handlers::AuthAppState;
pub use presentation::router::{api_router, protect, user_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
