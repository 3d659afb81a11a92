//! API DTOs

use chrono::{DateTime, Utc};
use kernel::order::Order;
use serde::Serialize;

use crate::domain::entities::{OrderRecord, OrderStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub subtotal_cents: i64,
    pub order: Order,
}

impl From<OrderRecord> for OrderResponse {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.order_id.to_string(),
            status: record.status,
            created_at: record.created_at,
            subtotal_cents: record.order.subtotal_cents(),
            order: record.order,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
}
