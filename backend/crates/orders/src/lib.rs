//! Orders Backend Module
//!
//! Order management for signed-in shoppers. Every route expects verified
//! [`kernel::claims::Claims`] in the request extensions, so the router must
//! be mounted behind the gateway's bearer middleware.
//!
//! Clean Architecture structure:
//! - `domain/` - Order record, placement rules, repository trait
//! - `application/` - Use cases
//! - `infra/` - In-memory repository
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::OrdersConfig;
pub use error::{OrderError, OrderResult};
pub use infra::memory::MemoryOrderRepository;
pub use presentation::router::orders_router;
