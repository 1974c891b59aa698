#![forbid(unsafe_code)]

//! Cooperative virtual timeline for cancellable one-shot timers.
//!
//! # Design
//!
//! The [`Scheduler`] owns a virtual clock (a `Duration` since construction)
//! and a queue of pending one-shot timers. Nothing fires on its own: the host
//! drives the timeline by calling [`advance()`](Scheduler::advance), which
//! steps the clock forward and fires every timer whose deadline falls inside
//! the step, in deadline order. This keeps all delayed work on a single
//! cooperative scheduling context and makes timing tests exact instead of
//! sleep-based.
//!
//! # Invariants
//!
//! 1. Timers fire at most once, in (deadline, schedule-order) order.
//! 2. The clock is stepped to each firing timer's deadline before its
//!    callback runs, so callbacks scheduling follow-up timers observe
//!    correct virtual time.
//! 3. Dropping a [`TimerHandle`] cancels the timer if it has not fired.
//! 4. No interior borrow is held while a callback runs; callbacks may
//!    schedule or cancel timers freely.
//! 5. A timer scheduled from within `advance()` whose deadline still falls
//!    inside the step fires during that same `advance()` call.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

struct TimerEntry {
    id: u64,
    deadline: Duration,
    callback: Box<dyn FnOnce()>,
}

struct SchedulerInner {
    now: Duration,
    next_id: u64,
    timers: Vec<TimerEntry>,
}

/// A cooperative timer queue over a virtual clock.
///
/// Cloning a `Scheduler` creates a new handle to the **same** timeline.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

/// Guard for a scheduled timer. Dropping it cancels the timer if it has not
/// fired yet.
#[must_use = "dropping a TimerHandle cancels the pending timer"]
pub struct TimerHandle {
    id: u64,
    scheduler: Weak<RefCell<SchedulerInner>>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Scheduler")
            .field("now", &inner.now)
            .field("pending", &inner.timers.len())
            .finish()
    }
}

impl Scheduler {
    /// Create a scheduler with its clock at zero and no pending timers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now: Duration::ZERO,
                next_id: 0,
                timers: Vec::new(),
            })),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Schedule `callback` to fire once, `after` the current virtual time.
    pub fn schedule(&self, after: Duration, callback: impl FnOnce() + 'static) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        let deadline = inner.now + after;
        inner.timers.push(TimerEntry {
            id,
            deadline,
            callback: Box::new(callback),
        });
        TimerHandle {
            id,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Step the clock forward by `dt`, firing every due timer in
    /// (deadline, schedule-order) order.
    pub fn advance(&self, dt: Duration) {
        let target = self.inner.borrow().now + dt;
        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                let idx = inner
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.deadline <= target)
                    .min_by_key(|(_, t)| (t.deadline, t.id))
                    .map(|(i, _)| i);
                match idx {
                    Some(i) => {
                        let timer = inner.timers.remove(i);
                        inner.now = inner.now.max(timer.deadline);
                        Some(timer)
                    }
                    None => {
                        inner.now = target;
                        None
                    }
                }
            };
            match due {
                Some(timer) => (timer.callback)(),
                None => break,
            }
        }
    }

    /// Cancel every pending timer without firing it.
    pub fn cancel_all(&self) {
        self.inner.borrow_mut().timers.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerHandle {
    /// Cancel the timer explicitly. Equivalent to dropping the handle.
    pub fn cancel(self) {}
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle").field("id", &self.id).finish()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.scheduler.upgrade() {
            inner.borrow_mut().timers.retain(|t| t.id != self.id);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
