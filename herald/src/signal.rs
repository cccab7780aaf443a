use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Identifies a subscription registered with [`Signal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// A reactive cell holding a value of type `T`.
///
/// Clones share the same value and subscriber list. Signals are `Rc` based
/// and live on the UI thread only.
#[derive(Clone)]
pub struct Signal<T: 'static + Clone> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<(SubscriptionId, Subscriber<T>)>>>,
    next_id: Rc<Cell<usize>>,
}

impl<T: 'static + Clone> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Read the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        {
            let mut value = self.value.borrow_mut();
            f(&mut value);
        }
        self.notify();
    }

    /// Register a callback that runs after every `set` or `update`.
    pub fn subscribe<F: Fn(&T) + 'static>(&self, f: F) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(f)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Snapshot both so subscribers are free to read or write the signal.
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        let value = self.get();

        for subscriber in subscribers {
            subscriber(&value);
        }
    }
}

impl<T: Clone + Default + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl From<&str> for Signal<String> {
    fn from(s: &str) -> Self {
        Signal::new(s.to_owned())
    }
}

impl From<String> for Signal<String> {
    fn from(s: String) -> Self {
        Signal::new(s)
    }
}

impl<T: Clone + fmt::Display + 'static> fmt::Display for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| fmt::Display::fmt(value, f))
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &*self.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Macro for ergonomic signal creation: signal!(value)
#[macro_export]
macro_rules! signal {
    ($val:expr) => {
        $crate::signal::Signal::new($val)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_get_set_update() {
        let s = Signal::new(1);
        assert_eq!(s.get(), 1);

        s.set(42);
        assert_eq!(s.get(), 42);

        s.update(|value| *value += 1);
        assert_eq!(s.get(), 43);
    }

    #[test]
    fn clones_share_state() {
        let a = signal!(0_u32);
        let b = a.clone();

        b.update(|value| *value += 5);
        assert_eq!(a.get(), 5);
    }

    #[test]
    fn subscribers_see_every_transition_in_order() {
        let s = signal!(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);

        s.subscribe(move |value| seen_clone.borrow_mut().push(*value));

        s.set(3);
        s.update(|value| *value *= 2);
        s.update(|value| *value += 1);

        assert_eq!(*seen.borrow(), vec![3, 6, 7]);
    }

    #[test]
    fn unsubscribed_callbacks_do_not_run() {
        let s = signal!(0);
        let calls = Rc::new(Cell::new(0));
        let calls_clone = Rc::clone(&calls);

        let id = s.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));
        s.set(1);
        assert!(s.unsubscribe(id));
        s.set(2);

        assert_eq!(calls.get(), 1);
        assert!(!s.unsubscribe(id));
        assert_eq!(s.subscriber_count(), 0);
    }

    #[test]
    fn subscriber_may_read_the_signal() {
        let s = signal!(10);
        let observed = Rc::new(Cell::new(0));
        let observed_clone = Rc::clone(&observed);
        let reader = s.clone();

        s.subscribe(move |_| observed_clone.set(reader.get()));
        s.set(11);

        assert_eq!(observed.get(), 11);
    }

    #[test]
    fn string_signal_display() {
        let s: Signal<String> = "Hello".into();
        assert_eq!(s.to_string(), "Hello");

        s.update(|value| value.push_str(", world!"));
        assert_eq!(format!("{s}"), "Hello, world!");
    }
}
