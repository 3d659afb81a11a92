//! Checkout Draft Order
//!
//! The order a customer assembles across the checkout wizard. The client
//! owns it while the wizard runs; the orders API receives it on submit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// The fields a carrier cannot do without.
    pub fn is_complete(&self) -> bool {
        [
            &self.full_name,
            &self.line1,
            &self.city,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    Standard,
    Express,
    Pickup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Paypal,
    CashOnDelivery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub sku: String,
    pub title: String,
    pub quantity: u32,
    /// Minor currency units
    pub unit_price_cents: i64,
}

impl OrderLine {
    pub fn total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub shipping_address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<ShippingMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line, merging quantities when the SKU is already present.
    pub fn add_line(&mut self, line: OrderLine) {
        match self.items.iter_mut().find(|existing| existing.sku == line.sku) {
            Some(existing) => existing.quantity += line.quantity,
            None => self.items.push(line),
        }
    }

    pub fn remove_line(&mut self, sku: &str) {
        self.items.retain(|line| line.sku != sku);
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(OrderLine::total_cents).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
