//! In-Memory Repository Implementation

use std::sync::Arc;

use kernel::id::{OrderId, UserId};
use tokio::sync::RwLock;

use crate::domain::entities::OrderRecord;
use crate::domain::repository::OrderRepository;
use crate::error::OrderResult;

/// Orders in insertion order
#[derive(Clone, Default)]
pub struct MemoryOrderRepository {
    records: Arc<RwLock<Vec<OrderRecord>>>,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderRepository for MemoryOrderRepository {
    async fn insert(&self, record: &OrderRecord) -> OrderResult<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<OrderRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| &r.order_id == order_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> OrderResult<Vec<OrderRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| r.is_owned_by(owner_id))
            .cloned()
            .collect())
    }
}
