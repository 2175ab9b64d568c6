//! Synchronous single-threaded publish/subscribe.
//!
//! A `Signal` remembers the latest value and replays it to new subscribers,
//! so a consumer attached after `init` still sees valid state. Delivery
//! happens inside `emit`, in subscription order.

/// Handle returned by [`Signal::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

pub struct Signal<T> {
    latest: Option<T>,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
    next_id: u64,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            latest: None,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("has_value", &self.latest.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. It is invoked immediately with the latest value, if any.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        if let Some(value) = &self.latest {
            callback(value);
        }
        self.subscribers.push((id, Box::new(callback)));
        tracing::trace!(?id, total = self.subscribers.len(), "subscribed");
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        before != self.subscribers.len()
    }

    /// Store `value` as the latest and deliver it to every subscriber.
    pub fn emit(&mut self, value: T) {
        let value = self.latest.insert(value);
        for (_, callback) in &mut self.subscribers {
            callback(value);
        }
    }

    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<i32>>>, impl FnMut(&i32) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &i32| sink.borrow_mut().push(*v))
    }

    #[test]
    fn delivers_in_emission_order() {
        let mut signal = Signal::new();
        let (seen, cb) = recorder();
        signal.subscribe(cb);
        signal.emit(1);
        signal.emit(2);
        signal.emit(3);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn late_subscriber_gets_latest_value() {
        let mut signal = Signal::new();
        signal.emit(7);
        signal.emit(8);
        let (seen, cb) = recorder();
        signal.subscribe(cb);
        assert_eq!(*seen.borrow(), vec![8]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut signal = Signal::new();
        let (seen, cb) = recorder();
        let id = signal.subscribe(cb);
        signal.emit(1);
        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.emit(2);
        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let mut signal = Signal::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&log);
        let b = Rc::clone(&log);
        signal.subscribe(move |v: &i32| a.borrow_mut().push(("a", *v)));
        signal.subscribe(move |v: &i32| b.borrow_mut().push(("b", *v)));
        signal.emit(5);
        assert_eq!(*log.borrow(), vec![("a", 5), ("b", 5)]);
    }
}
