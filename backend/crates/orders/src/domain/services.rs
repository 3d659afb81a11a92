//! Placement rules for a submitted draft

use kernel::order::Order;

use crate::application::config::OrdersConfig;
use crate::error::{OrderError, OrderResult};

/// Check a draft can be accepted as an order.
pub fn check_placeable(order: &Order, config: &OrdersConfig) -> OrderResult<()> {
    if order.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    if order.items.len() > config.max_line_items {
        return Err(OrderError::TooManyLines {
            max: config.max_line_items,
        });
    }

    for line in &order.items {
        if line.quantity == 0 || line.quantity > config.max_quantity_per_line {
            return Err(OrderError::InvalidLine(format!(
                "{}: quantity must be between 1 and {}",
                line.sku, config.max_quantity_per_line
            )));
        }
        if line.unit_price_cents < 0 {
            return Err(OrderError::InvalidLine(format!(
                "{}: price cannot be negative",
                line.sku
            )));
        }
    }

    if !order.shipping_address.is_complete() {
        return Err(OrderError::IncompleteAddress);
    }

    Ok(())
}
