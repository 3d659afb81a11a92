//! Place Order Use Case

use std::sync::Arc;

use kernel::id::UserId;
use kernel::order::Order;

use crate::application::config::OrdersConfig;
use crate::domain::entities::OrderRecord;
use crate::domain::repository::OrderRepository;
use crate::domain::services::check_placeable;
use crate::error::OrderResult;

pub struct PlaceOrderUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
    config: Arc<OrdersConfig>,
}

impl<R> PlaceOrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<OrdersConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, owner_id: UserId, order: Order) -> OrderResult<OrderRecord> {
        check_placeable(&order, &self.config)?;

        let record = OrderRecord::place(owner_id, order);
        self.repo.insert(&record).await?;

        tracing::info!(
            order_id = %record.order_id,
            owner_id = %record.owner_id,
            lines = record.order.items.len(),
            subtotal_cents = record.order.subtotal_cents(),
            "Order placed"
        );

        Ok(record)
    }
}
