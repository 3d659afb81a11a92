//! Order Record
//!
//! A placed order as the server stores it: the customer's submitted draft
//! plus ownership and lifecycle metadata.

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, UserId};
use kernel::order::Order;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted; fulfillment happens elsewhere
    Placed,
}

#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub owner_id: UserId,
    pub order: Order,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    pub fn place(owner_id: UserId, order: Order) -> Self {
        Self {
            order_id: OrderId::new(),
            owner_id,
            order,
            status: OrderStatus::Placed,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}
