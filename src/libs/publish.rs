//! Observable holder for the monitor's published activity state.
//!
//! The monitor announces state values through a `StatePublisher` rather than
//! letting callers poll internal fields. Observers are invoked after the
//! publisher's own lock is released, so an observer may re-enter the monitor
//! (query the current state, adjust parameters) without deadlocking.

use crate::libs::monitor::ActivityState;
use parking_lot::Mutex;
use std::sync::Arc;

/// A registered state observer.
pub type StateObserver = Arc<dyn Fn(ActivityState) + Send + Sync>;

/// Fan-out point for activity state publications.
#[derive(Default)]
pub struct StatePublisher {
    observers: Mutex<Vec<StateObserver>>,
}

impl StatePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer for every subsequent publication.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(ActivityState) + Send + Sync + 'static,
    {
        self.observers.lock().push(Arc::new(observer));
    }

    /// Publishes a state value to all registered observers.
    ///
    /// The observer list is snapshotted under the lock and invoked once the
    /// lock is released; publishing an unchanged value is allowed.
    pub fn publish(&self, state: ActivityState) {
        let observers: Vec<StateObserver> = self.observers.lock().clone();
        for observer in observers {
            observer(state);
        }
    }
}
