//! Repository Traits

use kernel::id::{OrderId, UserId};

use crate::domain::entities::OrderRecord;
use crate::error::OrderResult;

#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    async fn insert(&self, record: &OrderRecord) -> OrderResult<()>;

    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<OrderRecord>>;

    /// All orders placed by `owner_id`, newest first
    async fn list_by_owner(&self, owner_id: &UserId) -> OrderResult<Vec<OrderRecord>>;
}
