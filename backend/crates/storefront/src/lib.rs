//! Storefront Client
//!
//! The client half of the shop:
//! - `session` - bearer token lifecycle, login state, claims snapshot
//! - `checkout` - wizard step tracking and the draft order
//! - `api` - calls to the auth gateway
//! - `observable` - replaying values and plain event emitters
//! - `storage` - durable key-value storage for the token
//! - `user` - the decoded token payload
//!
//! Nothing here is global: build a [`SessionManager`] from an [`ApiClient`],
//! a [`KeyValueStorage`] and a [`Navigator`], and share it behind an `Arc`.

pub mod api;
pub mod checkout;
pub mod config;
pub mod error;
pub mod observable;
pub mod session;
pub mod storage;
pub mod user;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use api::{ApiClient, ApiResponse, Credentials, Endpoint};
pub use checkout::{CheckoutCoordinator, StepBounds};
pub use config::StorefrontConfig;
pub use error::{SessionError, SessionResult};
pub use observable::{EventEmitter, Observable, Subscription};
pub use session::{HistoryNavigator, LOGIN_ROUTE, Navigator, SessionManager, TOKEN_STORAGE_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use user::UserDetails;
