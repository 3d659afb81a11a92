//! Shared Kernel - vocabulary every storefront crate agrees on
//!
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed identifiers ([`id`])
//! - Bearer token claims and user roles ([`claims`], [`role`])
//! - The checkout draft order shared by the client and the orders API ([`order`])
//!
//! Only things with the same meaning on both sides of the wire live here.

pub mod error {
    pub mod app_error;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod response;
}
pub mod claims;
pub mod id;
pub mod order;
pub mod role;
