//! Application Layer
//!
//! Use cases and application services.

pub mod admin_auth;
pub mod config;
pub mod login;
pub mod register;
pub mod token;

// Re-exports
pub use admin_auth::AdminAuthUseCase;
pub use config::{AuthConfig, MAX_TOKEN_TTL};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::{IssuedToken, TokenIssuer};
