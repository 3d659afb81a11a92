//! Observable State
//!
//! Two push primitives for UI-facing state:
//!
//! - [`Observable`]: holds a current value and replays it to every new
//!   subscriber, then pushes each later `set`.
//! - [`EventEmitter`]: fire-and-forget events, no replay.
//!
//! Subscribers are called in subscription order, outside the internal lock,
//! from a snapshot taken when delivery starts. A subscriber added during a
//! notification first hears the next one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Observable
// ============================================================================

struct Subscriber<T> {
    id: u64,
    callback: Callback<T>,
    /// Highest version this subscriber has been handed
    seen: Arc<AtomicU64>,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
            seen: Arc::clone(&self.seen),
        }
    }
}

impl<T> Subscriber<T> {
    /// Deliver `value` unless this subscriber already saw `version` or newer.
    fn deliver(&self, version: u64, value: &T) {
        if self.seen.fetch_max(version, Ordering::SeqCst) < version {
            (self.callback)(value);
        }
    }
}

struct ObservableState<T> {
    value: T,
    /// Bumped on every `set`; starts at 1 so the replay of the initial value
    /// counts as a delivery.
    version: u64,
    next_id: u64,
    subscribers: Vec<Subscriber<T>>,
}

/// A value with change notification.
///
/// If a subscriber calls [`Observable::set`] while a delivery is running, the
/// nested value reaches every subscriber first and the outer delivery stops
/// there: no subscriber observes an older value after a newer one.
pub struct Observable<T> {
    state: Mutex<ObservableState<T>>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: Mutex::new(ObservableState {
                value: initial,
                version: 1,
                next_id: 0,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Clone of the current value
    pub fn get(&self) -> T {
        lock(&self.state).value.clone()
    }

    /// Replace the value and notify every subscriber.
    pub fn set(&self, value: T) {
        let (version, snapshot) = {
            let mut state = lock(&self.state);
            state.value = value.clone();
            state.version += 1;
            (state.version, state.subscribers.clone())
        };

        for subscriber in &snapshot {
            if self.version() != version {
                // A newer value was set during delivery and has already
                // been pushed to everyone.
                return;
            }
            subscriber.deliver(version, &value);
        }
    }

    /// Register `f`, immediately calling it with the current value.
    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let (subscriber, version, value) = {
            let mut state = lock(&self.state);
            let id = state.next_id;
            state.next_id += 1;
            let subscriber = Subscriber {
                id,
                callback: Arc::new(f),
                seen: Arc::new(AtomicU64::new(0)),
            };
            state.subscribers.push(subscriber.clone());
            (subscriber, state.version, state.value.clone())
        };

        subscriber.deliver(version, &value);
        Subscription(subscriber.id)
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut state = lock(&self.state);
        let before = state.subscribers.len();
        state.subscribers.retain(|s| s.id != subscription.0);
        state.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.state).subscribers.len()
    }

    fn version(&self) -> u64 {
        lock(&self.state).version
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("Observable")
            .field("value", &state.value)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

// ============================================================================
// EventEmitter
// ============================================================================

struct EmitterState<T> {
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// Synchronous event channel. Every `emit` reaches every current subscriber.
pub struct EventEmitter<T> {
    state: Mutex<EmitterState<T>>,
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EmitterState {
                next_id: 0,
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn emit(&self, event: T) {
        let snapshot: Vec<Callback<T>> = lock(&self.state)
            .subscribers
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in snapshot {
            callback(&event);
        }
    }

    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push((id, Arc::new(f)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut state = lock(&self.state);
        let before = state.subscribers.len();
        state.subscribers.retain(|(id, _)| *id != subscription.0);
        state.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.state).subscribers.len()
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
