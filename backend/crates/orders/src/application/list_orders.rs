//! List / Get Orders Use Cases

use std::sync::Arc;

use kernel::id::{OrderId, UserId};

use crate::domain::entities::OrderRecord;
use crate::domain::repository::OrderRepository;
use crate::error::{OrderError, OrderResult};

pub struct ListOrdersUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> ListOrdersUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner_id: &UserId) -> OrderResult<Vec<OrderRecord>> {
        self.repo.list_by_owner(owner_id).await
    }
}

pub struct GetOrderUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> GetOrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Someone else's order is reported as missing, not forbidden
    pub async fn execute(&self, owner_id: &UserId, order_id: &OrderId) -> OrderResult<OrderRecord> {
        self.repo
            .find_by_id(order_id)
            .await?
            .filter(|record| record.is_owned_by(owner_id))
            .ok_or(OrderError::NotFound)
    }
}
