#![forbid(unsafe_code)]

//! Quiescence filtering: the debounce stage.
//!
//! A debounced stage emits a value only after a full window has elapsed with
//! no newer value arriving. Each upstream emission replaces the pending value
//! and resets the timer, discarding the superseded value without emitting it.
//! No value is emitted before the first quiet window completes.
//!
//! Cancellation is structural: the pending timer is held as a
//! [`TimerHandle`](crate::scheduler::TimerHandle), so replacing it cancels
//! the superseded timer and dropping the stage cancels any pending window
//! without a final emission.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::scheduler::{Scheduler, TimerHandle};
use crate::stream::Stream;

impl<T: Clone + 'static> Stream<T> {
    /// Derive a stream that emits each value only after it has survived
    /// `window` without being superseded.
    ///
    /// A primed upstream starts an initial window at construction time, so
    /// the upstream's current value flows through once the timeline first
    /// advances past `window`.
    #[must_use]
    pub fn debounce(&self, scheduler: &Scheduler, window: Duration) -> Stream<T> {
        let out = Stream::new();
        let pending: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));

        // Shared between the subscription callback and construction-time
        // seeding: (re)arm the window timer for a newly arrived value.
        let arm = {
            let scheduler = scheduler.clone();
            let weak_out = out.downgrade();
            let pending = Rc::clone(&pending);
            Rc::new(move |value: T| {
                let weak_out = weak_out.clone();
                let handle = scheduler.schedule(window, move || {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        target: "signalform_core",
                        window_ms = window.as_millis() as u64,
                        "debounce window elapsed"
                    );
                    if let Some(inner) = weak_out.upgrade() {
                        Stream::emit_into(&inner, value);
                    }
                });
                // Replacing the handle cancels the superseded timer.
                *pending.borrow_mut() = Some(handle);
            })
        };

        let arm_in_cb = Rc::clone(&arm);
        let sub = self.subscribe(move |v: &T| arm_in_cb(v.clone()));
        out.keep(sub);
        out.keep(self.clone());

        if let Some(seed) = self.latest() {
            arm(seed);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
