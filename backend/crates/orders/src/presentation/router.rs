//! Orders Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::application::config::OrdersConfig;
use crate::domain::repository::OrderRepository;
use crate::presentation::handlers::{self, OrdersAppState};

/// Create the orders router for any repository implementation.
///
/// Carries no authentication of its own; mount it behind the bearer gate.
pub fn orders_router<R>(repo: R, config: OrdersConfig) -> Router
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let state = OrdersAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_orders::<R>).post(handlers::place_order::<R>),
        )
        .route("/{id}", get(handlers::get_order::<R>))
        .with_state(state)
}
