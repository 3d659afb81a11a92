//! Application Layer

pub mod config;
pub mod list_orders;
pub mod place_order;

pub use config::OrdersConfig;
pub use list_orders::{GetOrderUseCase, ListOrdersUseCase};
pub use place_order::PlaceOrderUseCase;
