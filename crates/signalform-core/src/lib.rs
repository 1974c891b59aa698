#![forbid(unsafe_code)]

//! Reactive primitives for the signalform validation engine.
//!
//! This crate provides the building blocks for push-based dataflow pipelines:
//!
//! - [`Observable`]: A shared, version-tracked value wrapper with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`Stream`]: A push-based derived value stream with `map`, `distinct`,
//!   `debounce`, and combine-latest combinators.
//! - [`Scheduler`]: A cooperative virtual timeline for cancellable one-shot
//!   timers, driven by explicit [`advance`](Scheduler::advance) calls.
//!
//! # Architecture
//!
//! Everything here is single-threaded: shared state is `Rc<RefCell<..>>`,
//! subscribers are held as `Weak` callback slots and cleaned up lazily during
//! notification, and delayed work (debounce windows) is scheduled against one
//! virtual clock rather than OS timers. Holding the tail of a pipeline keeps
//! the whole chain alive; every reference pointing back down a chain is weak,
//! so pipelines never form reference cycles.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use signalform_core::{Observable, Scheduler, Stream};
//!
//! let field = Observable::new(String::new());
//! let scheduler = Scheduler::new();
//! let quiescent = Stream::from_observable(&field)
//!     .debounce(&scheduler, Duration::from_millis(100));
//!
//! field.set("a".into());
//! field.set("ab".into());
//! scheduler.advance(Duration::from_millis(100));
//!
//! assert_eq!(quiescent.latest(), Some("ab".to_string()));
//! ```

pub mod observable;
pub mod scheduler;
pub mod stream;

mod combine;
mod debounce;

pub use observable::{Observable, Subscription};
pub use scheduler::{Scheduler, TimerHandle};
pub use stream::Stream;
