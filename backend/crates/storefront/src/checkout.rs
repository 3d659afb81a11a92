//! Checkout Coordinator
//!
//! Tracks which wizard step is active and the draft order being filled in.
//! Every navigation call notifies `step_changed` exactly once, even when the
//! index did not move.

use kernel::order::Order;

use crate::observable::{EventEmitter, Subscription};

pub const DEFAULT_STEPS: [&str; 4] = ["1. Address", "2. Shipping", "3. Payment", "4. Review"];

/// What happens when navigation would leave the step range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepBounds {
    /// Stay within `0..step_count`
    #[default]
    Clamp,
    /// Move anyway; callers deal with out-of-range indices
    Unbounded,
}

#[derive(Debug)]
pub struct CheckoutCoordinator {
    active_step: i32,
    order_in_progress: Order,
    steps: Vec<String>,
    bounds: StepBounds,
    step_changed: EventEmitter<i32>,
}

impl Default for CheckoutCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutCoordinator {
    pub fn new() -> Self {
        Self {
            active_step: 0,
            order_in_progress: Order::new(),
            steps: DEFAULT_STEPS.iter().map(|s| s.to_string()).collect(),
            bounds: StepBounds::default(),
            step_changed: EventEmitter::new(),
        }
    }

    /// Replace the step titles. The active step is left where it is.
    pub fn with_steps<I, T>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_bounds(mut self, bounds: StepBounds) -> Self {
        self.bounds = bounds;
        self
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn goto_step(&mut self, step: i32) {
        self.active_step = match self.bounds {
            StepBounds::Clamp => step.clamp(0, self.last_index()),
            StepBounds::Unbounded => step,
        };
        tracing::debug!(step = self.active_step, "Checkout step changed");
        self.step_changed.emit(self.active_step);
    }

    pub fn next_step(&mut self) {
        self.goto_step(self.active_step.saturating_add(1));
    }

    pub fn previous_step(&mut self) {
        self.goto_step(self.active_step.saturating_sub(1));
    }

    pub fn active_step(&self) -> i32 {
        self.active_step
    }

    pub fn is_last_step(&self) -> bool {
        self.active_step >= self.last_index()
    }

    // ========================================================================
    // Steps
    // ========================================================================

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// `None` when the active step is out of range (only under `Unbounded`).
    pub fn current_step_title(&self) -> Option<&str> {
        usize::try_from(self.active_step)
            .ok()
            .and_then(|i| self.steps.get(i))
            .map(String::as_str)
    }

    // ========================================================================
    // Draft order
    // ========================================================================

    pub fn order(&self) -> &Order {
        &self.order_in_progress
    }

    pub fn order_mut(&mut self) -> &mut Order {
        &mut self.order_in_progress
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&i32) + Send + Sync + 'static,
    {
        self.step_changed.subscribe(f)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.step_changed.unsubscribe(subscription)
    }

    fn last_index(&self) -> i32 {
        i32::try_from(self.steps.len())
            .unwrap_or(i32::MAX)
            .saturating_sub(1)
            .max(0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn observed(checkout: &CheckoutCoordinator) -> Arc<Mutex<Vec<i32>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        checkout.subscribe(move |step| sink.lock().unwrap().push(*step));
        log
    }

    #[test]
    fn test_starts_at_first_step_with_empty_order() {
        let checkout = CheckoutCoordinator::new();
        assert_eq!(checkout.active_step(), 0);
        assert_eq!(checkout.current_step_title(), Some("1. Address"));
        assert_eq!(checkout.steps().len(), 4);
        assert!(checkout.order().is_empty());
        assert!(!checkout.is_last_step());
    }

    #[test]
    fn test_next_step_three_times() {
        let mut checkout = CheckoutCoordinator::new();
        let log = observed(&checkout);

        checkout.next_step();
        checkout.next_step();
        checkout.next_step();

        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
        assert!(checkout.is_last_step());
        assert_eq!(checkout.current_step_title(), Some("4. Review"));
    }

    #[test]
    fn test_goto_step_notifies_every_subscriber_once() {
        let mut checkout = CheckoutCoordinator::new();
        let first = observed(&checkout);
        let second = observed(&checkout);

        checkout.goto_step(2);

        assert_eq!(checkout.active_step(), 2);
        assert_eq!(*first.lock().unwrap(), vec![2]);
        assert_eq!(*second.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_clamp_still_notifies() {
        let mut checkout = CheckoutCoordinator::new();
        let log = observed(&checkout);

        checkout.previous_step();
        assert_eq!(checkout.active_step(), 0);

        checkout.goto_step(3);
        checkout.next_step();
        assert_eq!(checkout.active_step(), 3);

        checkout.goto_step(42);
        assert_eq!(*log.lock().unwrap(), vec![0, 3, 3, 3]);
    }

    #[test]
    fn test_unbounded_leaves_range() {
        let mut checkout = CheckoutCoordinator::new().with_bounds(StepBounds::Unbounded);
        let log = observed(&checkout);

        checkout.previous_step();
        assert_eq!(checkout.active_step(), -1);
        assert_eq!(checkout.current_step_title(), None);

        checkout.goto_step(3);
        checkout.next_step();
        assert_eq!(checkout.active_step(), 4);
        assert_eq!(checkout.current_step_title(), None);
        assert_eq!(*log.lock().unwrap(), vec![-1, 3, 4]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut checkout = CheckoutCoordinator::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let sub = checkout.subscribe(move |step| sink.lock().unwrap().push(*step));

        checkout.next_step();
        assert!(checkout.unsubscribe(sub));
        checkout.next_step();
        assert_eq!(*log.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_custom_steps() {
        let mut checkout = CheckoutCoordinator::new().with_steps(["Cart", "Pay"]);
        checkout.next_step();
        checkout.next_step();
        assert_eq!(checkout.active_step(), 1);
        assert_eq!(checkout.current_step_title(), Some("Pay"));
    }

    #[test]
    fn test_draft_survives_navigation() {
        let mut checkout = CheckoutCoordinator::new();
        checkout.order_mut().email = Some("a@b.com".to_string());

        checkout.goto_step(3);
        checkout.previous_step();
        checkout.goto_step(0);

        assert_eq!(checkout.order().email.as_deref(), Some("a@b.com"));
        assert!(CheckoutCoordinator::new().order().email.is_none());
    }
}
