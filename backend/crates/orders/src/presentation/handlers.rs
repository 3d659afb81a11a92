//! HTTP Handlers
//!
//! All handlers read the caller from `Extension<Claims>`, which the bearer
//! gate inserts.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::claims::Claims;
use kernel::id::{OrderId, UserId};
use kernel::order::Order;

use crate::application::config::OrdersConfig;
use crate::application::{GetOrderUseCase, ListOrdersUseCase, PlaceOrderUseCase};
use crate::domain::repository::OrderRepository;
use crate::error::{OrderError, OrderResult};
use crate::presentation::dto::{OrderListResponse, OrderResponse};

/// Shared state for order handlers
#[derive(Clone)]
pub struct OrdersAppState<R>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<OrdersConfig>,
}

fn owner_id(claims: &Claims) -> OrderResult<UserId> {
    UserId::from_str(&claims.sub).map_err(|_| OrderError::InvalidSubject)
}

/// POST /api/orders
pub async fn place_order<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(claims): Extension<Claims>,
    Json(order): Json<Order>,
) -> OrderResult<(StatusCode, Json<OrderResponse>)>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let owner_id = owner_id(&claims)?;
    let record = PlaceOrderUseCase::new(state.repo.clone(), state.config.clone())
        .execute(owner_id, order)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /api/orders
pub async fn list_orders<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(claims): Extension<Claims>,
) -> OrderResult<Json<OrderListResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let owner_id = owner_id(&claims)?;
    let records = ListOrdersUseCase::new(state.repo.clone())
        .execute(&owner_id)
        .await?;

    Ok(Json(OrderListResponse {
        orders: records.into_iter().map(OrderResponse::from).collect(),
    }))
}

/// GET /api/orders/{id}
pub async fn get_order<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> OrderResult<Json<OrderResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let owner_id = owner_id(&claims)?;
    // An id that cannot exist is just another missing order
    let order_id = OrderId::from_str(&id).map_err(|_| OrderError::NotFound)?;

    let record = GetOrderUseCase::new(state.repo.clone())
        .execute(&owner_id, &order_id)
        .await?;

    Ok(Json(record.into()))
}
