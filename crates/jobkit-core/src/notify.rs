//! Change notification for parameter stores.
//!
//! Observers are told *that* something changed, never *what*: on every
//! notification they re-read the whole parameter set. Consumers that prefer
//! polling can compare [`ChangeNotifier::version`] instead of subscribing.

use std::fmt;

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Multicast observer list with a mutation counter.
#[derive(Default)]
pub struct ChangeNotifier {
    version: u64,
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer called on every notification.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    /// Bumps the version and calls every observer in subscription order.
    pub fn notify(&mut self) {
        self.version += 1;
        for (_, observer) in &mut self.observers {
            observer();
        }
    }

    /// Number of notifications so far.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn test_every_observer_is_called() {
        let mut notifier = ChangeNotifier::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let counter = Rc::clone(&first);
        notifier.subscribe(move || counter.set(counter.get() + 1));
        let counter = Rc::clone(&second);
        notifier.subscribe(move || counter.set(counter.get() + 1));

        notifier.notify();
        notifier.notify();
        assert_eq!(first.get(), 2);
        assert_eq!(second.get(), 2);
        assert_eq!(notifier.version(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut notifier = ChangeNotifier::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = notifier.subscribe(move || counter.set(counter.get() + 1));

        notifier.notify();
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify();

        assert_eq!(calls.get(), 1);
        assert_eq!(notifier.version(), 2);
    }
}
