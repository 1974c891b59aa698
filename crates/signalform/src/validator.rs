#![forbid(unsafe_code)]

//! The sign-up validation engine.
//!
//! # Design
//!
//! [`SignupValidator`] owns the three input fields, the three output fields,
//! the timer scheduler, and every intermediate stream between them. Writes
//! go through [`set_username`](SignupValidator::set_username) /
//! [`set_password`](SignupValidator::set_password) /
//! [`set_confirmation`](SignupValidator::set_confirmation) only; reads come
//! back as snapshots or per-field change subscriptions. No handle to
//! interior state is ever given out.
//!
//! The pipeline, stage by stage:
//!
//! ```text
//! password ──── debounce ── distinct ── is_empty ──────────┐
//! password ─┬── combine ─── debounce ── passwords_match ───┼─ combine ── PasswordCheck
//! confirm  ─┘                                              │
//! password ──── debounce ── distinct ── classify ── strong ┘
//! username ──── debounce ── distinct ── long_enough ── combine ── is_valid
//! ```
//!
//! The emptiness and username checks sit behind the long window, equality
//! and strength behind the short one. Field streams are seeded with their
//! construction-time values, so an untouched form still classifies (an
//! empty password reports "Password must not be empty" one long window
//! after construction, with no keystroke).
//!
//! # Invariants
//!
//! 1. Field writes never block on propagation; they mutate the observable
//!    and return.
//! 2. Each output field updates independently as its upstream judgment
//!    emits; reads across fields are eventually-consistent snapshots, not
//!    atomic.
//! 3. The validity flag emits only after both the username judgment and the
//!    password classification have each emitted at least once.
//! 4. After [`dispose`](SignupValidator::dispose), no emission of any kind
//!    occurs: stages and subscriptions are dropped and the timer queue is
//!    cleared. Disposing twice is a no-op.
//!
//! # Failure Modes
//!
//! - **Re-entrant writes**: subscriber callbacks must not write back into
//!   the engine; derivations are pure and the subscription surface is for
//!   reading outward into a view layer.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use signalform_core::{Observable, Scheduler, Stream, Subscription};
use web_time::Instant;

use crate::config::DebouncePolicy;
use crate::messages;
use crate::rules::{self, PasswordCheck};
use crate::strength::{StrengthClassifier, StrengthLevel};

/// Eventually-consistent snapshot of the three output fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSnapshot {
    pub username_message: String,
    pub password_message: String,
    pub is_valid: bool,
}

/// Terminal streams of the pipeline. Each stage owns its upstream chain, so
/// holding these three keeps the whole graph alive; dropping the struct
/// releases every stage and cancels any pending debounce window.
struct Stages {
    username_valid: Stream<bool>,
    password_check: Stream<PasswordCheck>,
    form_valid: Stream<bool>,
}

/// Reactive sign-up form validator.
///
/// See the [module docs](self) for the pipeline layout and the engine
/// contract.
pub struct SignupValidator {
    username: Observable<String>,
    password: Observable<String>,
    confirmation: Observable<String>,

    username_message: Observable<String>,
    password_message: Observable<String>,
    is_valid: Observable<bool>,

    scheduler: Scheduler,
    stages: Option<Stages>,
    subscriptions: Vec<Subscription>,
    last_poll: Cell<Option<Instant>>,
}

impl SignupValidator {
    /// Create an engine with the default debounce policy.
    #[must_use]
    pub fn new(classifier: impl StrengthClassifier + 'static) -> Self {
        Self::with_policy(classifier, DebouncePolicy::default())
    }

    /// Create an engine with an explicit debounce policy.
    #[must_use]
    pub fn with_policy(
        classifier: impl StrengthClassifier + 'static,
        policy: DebouncePolicy,
    ) -> Self {
        let username = Observable::new(String::new());
        let password = Observable::new(String::new());
        let confirmation = Observable::new(String::new());

        let username_message = Observable::new(String::new());
        let password_message = Observable::new(String::new());
        let is_valid = Observable::new(false);

        let scheduler = Scheduler::new();
        let classifier: Rc<dyn StrengthClassifier> = Rc::new(classifier);

        let username_raw = Stream::from_observable(&username);
        let password_raw = Stream::from_observable(&password);
        let confirmation_raw = Stream::from_observable(&confirmation);

        let is_empty = password_raw
            .debounce(&scheduler, policy.password_empty)
            .distinct()
            .map(|p: &String| rules::is_password_empty(p));

        // Equality re-evaluates on any change to either operand, so the
        // pair stream carries no duplicate suppression.
        let is_match = Stream::combine2(&password_raw, &confirmation_raw, |p: &String, c: &String| {
            (p.clone(), c.clone())
        })
        .debounce(&scheduler, policy.equality)
        .map(|(p, c): &(String, String)| rules::passwords_match(p, c));

        let strong_enough = {
            let classifier = Rc::clone(&classifier);
            password_raw
                .debounce(&scheduler, policy.strength)
                .distinct()
                .map(move |p: &String| classifier.classify(p))
                .map(|level: &StrengthLevel| rules::is_strong_enough(*level))
        };

        let password_check = Stream::combine3(
            &is_empty,
            &is_match,
            &strong_enough,
            |empty: &bool, matches: &bool, strong: &bool| {
                PasswordCheck::resolve(*empty, *matches, *strong)
            },
        );

        let username_valid = username_raw
            .debounce(&scheduler, policy.username)
            .distinct()
            .map(|u: &String| rules::is_username_valid(u));

        let form_valid = Stream::combine2(
            &username_valid,
            &password_check,
            |valid: &bool, check: &PasswordCheck| *valid && check.is_valid(),
        );

        let mut subscriptions = Vec::with_capacity(3);
        {
            let sink = username_message.clone();
            subscriptions.push(username_valid.subscribe(move |valid: &bool| {
                let message = messages::username_message(*valid);
                tracing::debug!(target: "signalform", valid = *valid, "username judgment");
                sink.set(message.to_string());
            }));
        }
        {
            let sink = password_message.clone();
            subscriptions.push(password_check.subscribe(move |check: &PasswordCheck| {
                let message = messages::password_message(*check);
                tracing::debug!(target: "signalform", check = ?check, "password judgment");
                sink.set(message.to_string());
            }));
        }
        {
            let sink = is_valid.clone();
            subscriptions.push(form_valid.subscribe(move |valid: &bool| {
                tracing::debug!(target: "signalform", valid = *valid, "form validity");
                sink.set(*valid);
            }));
        }

        Self {
            username,
            password,
            confirmation,
            username_message,
            password_message,
            is_valid,
            scheduler,
            stages: Some(Stages {
                username_valid,
                password_check,
                form_valid,
            }),
            subscriptions,
            last_poll: Cell::new(Some(Instant::now())),
        }
    }

    // ── Inputs ──────────────────────────────────────────────────────────

    /// Record one discrete edit of the username field.
    pub fn set_username(&self, text: &str) {
        tracing::trace!(target: "signalform", field = "username", "field edited");
        self.username.set(text.to_string());
    }

    /// Record one discrete edit of the password field.
    pub fn set_password(&self, text: &str) {
        tracing::trace!(target: "signalform", field = "password", "field edited");
        self.password.set(text.to_string());
    }

    /// Record one discrete edit of the confirmation field.
    pub fn set_confirmation(&self, text: &str) {
        tracing::trace!(target: "signalform", field = "confirmation", "field edited");
        self.confirmation.set(text.to_string());
    }

    // ── Outputs ─────────────────────────────────────────────────────────

    /// Current username error message ("" when the username is fine).
    #[must_use]
    pub fn username_message(&self) -> String {
        self.username_message.get()
    }

    /// Current password error message ("" when the password is fine).
    #[must_use]
    pub fn password_message(&self) -> String {
        self.password_message.get()
    }

    /// Current overall validity flag.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid.get()
    }

    /// Snapshot of all three output fields. Fields update independently, so
    /// the snapshot is eventually consistent, not atomic across fields.
    #[must_use]
    pub fn output(&self) -> OutputSnapshot {
        OutputSnapshot {
            username_message: self.username_message.get(),
            password_message: self.password_message.get(),
            is_valid: self.is_valid.get(),
        }
    }

    /// Subscribe to username-message changes.
    pub fn on_username_message(&self, f: impl Fn(&str) + 'static) -> Subscription {
        self.username_message.subscribe(move |m: &String| f(m))
    }

    /// Subscribe to password-message changes.
    pub fn on_password_message(&self, f: impl Fn(&str) + 'static) -> Subscription {
        self.password_message.subscribe(move |m: &String| f(m))
    }

    /// Subscribe to validity-flag changes.
    pub fn on_validity(&self, f: impl Fn(bool) + 'static) -> Subscription {
        self.is_valid.subscribe(move |v: &bool| f(*v))
    }

    // ── Timeline ────────────────────────────────────────────────────────

    /// Step the engine's timeline forward by `dt`, firing due debounce
    /// windows. Deterministic; the mode every test uses.
    pub fn advance(&self, dt: Duration) {
        self.scheduler.advance(dt);
    }

    /// Advance the timeline by the wall-clock time elapsed since the
    /// previous `poll` (or since construction, for the first call).
    /// Interactive hosts call this from their frame loop.
    pub fn poll(&self) {
        let now = Instant::now();
        if let Some(previous) = self.last_poll.replace(Some(now)) {
            self.scheduler.advance(now.duration_since(previous));
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Tear the pipeline down: drop every stage and subscription and cancel
    /// every pending debounce window. No emission of any kind happens
    /// afterward; output fields freeze at their last projected values.
    /// Disposing twice is a no-op.
    pub fn dispose(&mut self) {
        if self.stages.is_none() {
            return;
        }
        tracing::debug!(target: "signalform", "engine disposed");
        self.subscriptions.clear();
        self.stages = None;
        self.scheduler.cancel_all();
    }

    /// Whether the engine has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.stages.is_none()
    }
}

impl Drop for SignupValidator {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for SignupValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupValidator")
            .field("output", &self.output())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn weak_classifier() -> impl StrengthClassifier + 'static {
        |_: &str| StrengthLevel::Weak
    }

    #[test]
    fn outputs_start_clean() {
        let engine = SignupValidator::new(weak_classifier());
        assert_eq!(engine.username_message(), "");
        assert_eq!(engine.password_message(), "");
        assert!(!engine.is_valid());
    }

    #[test]
    fn untouched_form_classifies_after_long_window() {
        let engine = SignupValidator::new(weak_classifier());
        engine.advance(ms(800));
        assert_eq!(engine.username_message(), messages::USERNAME_TOO_SHORT);
        assert_eq!(engine.password_message(), messages::PASSWORD_EMPTY);
        assert!(!engine.is_valid());
    }

    #[test]
    fn writes_do_not_propagate_synchronously() {
        let engine = SignupValidator::new(weak_classifier());
        engine.set_username("ab");
        assert_eq!(engine.username_message(), "");
    }

    #[test]
    fn output_subscribers_fire_on_change() {
        let engine = SignupValidator::new(weak_classifier());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in_cb = Rc::clone(&seen);
        let _sub = engine.on_username_message(move |m| seen_in_cb.borrow_mut().push(m.to_string()));

        engine.set_username("ab");
        engine.advance(ms(800));
        assert_eq!(*seen.borrow(), vec![messages::USERNAME_TOO_SHORT.to_string()]);
    }

    #[test]
    fn snapshot_reflects_current_fields() {
        let engine = SignupValidator::new(weak_classifier());
        engine.set_username("ab");
        engine.advance(ms(800));

        let snapshot = engine.output();
        assert_eq!(snapshot.username_message, messages::USERNAME_TOO_SHORT);
        assert_eq!(snapshot.password_message, messages::PASSWORD_EMPTY);
        assert!(!snapshot.is_valid);
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut engine = SignupValidator::new(weak_classifier());
        assert!(!engine.is_disposed());
        engine.dispose();
        assert!(engine.is_disposed());
        engine.dispose();
        assert!(engine.is_disposed());
    }

    #[test]
    fn no_emission_after_dispose() {
        let mut engine = SignupValidator::new(weak_classifier());
        engine.set_username("ab");
        engine.dispose();

        engine.advance(ms(5_000));
        assert_eq!(engine.username_message(), "");
        assert!(!engine.is_valid());
    }

    #[test]
    fn dispose_mid_window_discards_pending_value() {
        let mut engine = SignupValidator::new(weak_classifier());
        engine.set_username("ab");
        engine.advance(ms(799));
        engine.dispose();
        engine.advance(ms(10));
        assert_eq!(engine.username_message(), "");
    }

    #[test]
    fn writes_after_dispose_are_inert() {
        let mut engine = SignupValidator::new(weak_classifier());
        engine.dispose();
        engine.set_username("ab");
        engine.advance(ms(800));
        assert_eq!(engine.username_message(), "");
    }

    #[test]
    fn poll_does_not_panic() {
        let engine = SignupValidator::new(weak_classifier());
        engine.poll();
        engine.poll();
    }
}
