//! Domain Layer

pub mod entities;
pub mod repository;
pub mod services;

pub use entities::{OrderRecord, OrderStatus};
pub use repository::OrderRepository;
