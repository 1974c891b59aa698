#![forbid(unsafe_code)]

//! Shared, version-tracked values with change notification.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value in shared, reference-counted storage.
//! Consumers register callbacks via [`subscribe()`](Observable::subscribe)
//! and receive the new value on every effective mutation. Cloning an
//! `Observable` creates a new handle to the **same** inner state.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. No interior borrow is held while a subscriber callback runs, so
//!    callbacks may freely read this observable or mutate *other*
//!    observables.
//!
//! # Failure Modes
//!
//! - **Callback writes back into the same observable**: the write itself is
//!   fine (no borrow is held), but the resulting recursion is unbounded if
//!   every write triggers another. Derivation callbacks are expected to be
//!   pure.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A type-erased strong holder for one subscriber callback.
///
/// The observable stores only a `Weak` to the slot; the strong `Rc` lives in
/// the [`Subscription`] guard, so dropping the guard detaches the callback.
pub(crate) struct CallbackSlot<T> {
    pub(crate) call: Box<dyn Fn(&T)>,
}

/// RAII guard for a registered callback.
///
/// Non-generic so heterogeneous subscriptions can be stowed in one `Vec`.
#[must_use = "dropping a Subscription immediately detaches its callback"]
pub struct Subscription {
    _slot: Rc<dyn Any>,
}

impl Subscription {
    pub(crate) fn new(slot: Rc<dyn Any>) -> Self {
        Self { _slot: slot }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

struct ObservableInner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<CallbackSlot<T>>>,
}

/// A shared value that notifies subscribers when it changes.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Create a new observable holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure mutates this same observable (re-entrant
    /// borrow).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Current version number. Increments by 1 on each effective mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Register a callback invoked with the new value after every effective
    /// mutation.
    ///
    /// The callback stays registered for the lifetime of the returned
    /// [`Subscription`].
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let slot = Rc::new(CallbackSlot {
            call: Box::new(f),
        });
        self.inner.borrow_mut().subscribers.push(Rc::downgrade(&slot));
        Subscription::new(slot)
    }

    fn notify(&self) {
        // Snapshot live subscribers and release the borrow before calling
        // out, so callbacks can read this observable and write others.
        let (value, slots) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let slots: Vec<Rc<CallbackSlot<T>>> =
                inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (inner.value.clone(), slots)
        };
        for slot in slots {
            (slot.call)(&value);
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Replace the value, bumping the version and notifying subscribers.
    ///
    /// Setting a value equal to the current one is a no-op.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
