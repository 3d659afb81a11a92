//! Orders configuration

#[derive(Debug, Clone)]
pub struct OrdersConfig {
    /// Distinct SKUs per order
    pub max_line_items: usize,
    pub max_quantity_per_line: u32,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            max_line_items: 100,
            max_quantity_per_line: 99,
        }
    }
}
