#![forbid(unsafe_code)]

//! Push-based derived value streams.
//!
//! # Design
//!
//! A [`Stream<T>`] is a value that changes over time: it remembers the latest
//! emitted value (`None` until the first emission — the stream is *unprimed*)
//! and notifies subscribers on every emission. Unlike [`Observable`], a
//! stream re-emits equal values; duplicate suppression is an explicit stage
//! ([`distinct()`](Stream::distinct)), mirroring where a pipeline author
//! chooses to place it.
//!
//! Combinator stages (`map`, `distinct`, `debounce`, `combine2`/`combine3`)
//! stow their upstream subscription guards and upstream handles inside the
//! derived stream, so holding the tail of a pipeline keeps the whole chain
//! alive. All references pointing back *down* a chain are weak: dropping the
//! tail releases every intermediate stage.
//!
//! # Invariants
//!
//! 1. `latest()` is updated before subscribers are notified, so a callback
//!    reading any stream in the graph sees post-emission state.
//! 2. Subscribers are notified in registration order, with no interior
//!    borrow held across callback invocations.
//! 3. A stage built from a primed upstream processes the upstream's current
//!    value at construction time (current-value semantics).

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::observable::{CallbackSlot, Observable, Subscription};

pub(crate) struct StreamInner<T> {
    latest: Option<T>,
    subscribers: Vec<Weak<CallbackSlot<T>>>,
    /// Upstream subscription guards and stream handles. Never read after
    /// construction, but must be kept alive for the chain to deliver.
    upstream: Vec<Box<dyn Any>>,
}

/// A push-based stream of values with a remembered latest emission.
///
/// Cloning a `Stream` creates a new handle to the **same** inner state.
pub struct Stream<T> {
    inner: Rc<RefCell<StreamInner<T>>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Stream")
            .field("latest", &inner.latest)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// Create an unprimed stream.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(StreamInner {
                latest: None,
                subscribers: Vec::new(),
                upstream: Vec::new(),
            })),
        }
    }

    /// Push a value into the stream, recording it as the latest emission and
    /// notifying subscribers.
    pub fn emit(&self, value: T) {
        Self::emit_into(&self.inner, value);
    }

    /// Emission entry point shared with combinator callbacks that only hold
    /// a weak handle to the inner state.
    pub(crate) fn emit_into(inner: &Rc<RefCell<StreamInner<T>>>, value: T) {
        let slots = {
            let mut borrowed = inner.borrow_mut();
            borrowed.latest = Some(value.clone());
            borrowed.subscribers.retain(|w| w.strong_count() > 0);
            borrowed
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect::<Vec<_>>()
        };
        for slot in slots {
            (slot.call)(&value);
        }
    }

    /// The most recently emitted value, or `None` if nothing has been
    /// emitted yet.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.inner.borrow().latest.clone()
    }

    /// Whether the stream has emitted at least once.
    #[must_use]
    pub fn is_primed(&self) -> bool {
        self.inner.borrow().latest.is_some()
    }

    /// Register a callback invoked with every emitted value.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let slot = Rc::new(CallbackSlot {
            call: Box::new(f),
        });
        self.inner.borrow_mut().subscribers.push(Rc::downgrade(&slot));
        Subscription::new(slot)
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<StreamInner<T>>> {
        Rc::downgrade(&self.inner)
    }

    /// Stow a guard that must stay alive as long as this stream does.
    pub(crate) fn keep(&self, guard: impl Any) {
        self.inner.borrow_mut().upstream.push(Box::new(guard));
    }

    /// Bridge an [`Observable`] into a stream.
    ///
    /// The stream is seeded with the observable's current value, so a
    /// pipeline built over it reacts to construction-time state as well as
    /// later writes.
    #[must_use]
    pub fn from_observable(source: &Observable<T>) -> Self {
        let out = Stream::new();
        let weak_out = out.downgrade();
        let sub = source.subscribe(move |v: &T| {
            if let Some(inner) = weak_out.upgrade() {
                Stream::emit_into(&inner, v.clone());
            }
        });
        out.keep(sub);
        out.keep(source.clone());
        out.emit(source.get());
        out
    }

    /// Derive a stream by applying `f` to every emission.
    #[must_use]
    pub fn map<U: Clone + 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Stream<U> {
        let out = Stream::<U>::new();
        let f = Rc::new(f);
        let weak_out = out.downgrade();
        let f_in_cb = Rc::clone(&f);
        let sub = self.subscribe(move |v: &T| {
            if let Some(inner) = weak_out.upgrade() {
                Stream::emit_into(&inner, f_in_cb(v));
            }
        });
        out.keep(sub);
        out.keep(self.clone());
        if let Some(seed) = self.latest() {
            out.emit(f(&seed));
        }
        out
    }

    /// Suppress emissions equal (by value) to the previous emission from
    /// this stage.
    #[must_use]
    pub fn distinct(&self) -> Stream<T>
    where
        T: PartialEq,
    {
        let out = Stream::new();
        let weak_out = out.downgrade();
        let sub = self.subscribe(move |v: &T| {
            if let Some(inner) = weak_out.upgrade() {
                let repeat = inner.borrow().latest.as_ref() == Some(v);
                if !repeat {
                    Stream::emit_into(&inner, v.clone());
                }
            }
        });
        out.keep(sub);
        out.keep(self.clone());
        if let Some(seed) = self.latest() {
            out.emit(seed);
        }
        out
    }
}

impl<T: Clone + 'static> Default for Stream<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
