#![forbid(unsafe_code)]

//! Reactive sign-up form validation.
//!
//! [`SignupValidator`] owns three input fields (username, password,
//! confirmation) and validates them as the user types, producing two
//! human-readable error messages and an overall validity flag. The work
//! happens in a push-based pipeline of derived value streams: raw field
//! changes are debounced and deduplicated into quiescent values, mapped
//! through pure judgments, joined with combine-latest semantics into a
//! prioritized [`PasswordCheck`], and projected onto the output fields.
//!
//! Password strength scoring is an external collaborator: hosts supply any
//! [`StrengthClassifier`] (a plain `Fn(&str) -> StrengthLevel` works), and
//! the engine only consumes the five ordered levels it returns. The
//! `zxcvbn` feature provides a ready-made classifier.
//!
//! All propagation happens on one cooperative timeline. Tests and
//! deterministic hosts drive it with [`advance`](SignupValidator::advance);
//! interactive hosts call [`poll`](SignupValidator::poll) from their frame
//! loop.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use signalform::{SignupValidator, StrengthLevel};
//!
//! let engine = SignupValidator::new(|password: &str| {
//!     if password.len() >= 12 { StrengthLevel::Strong } else { StrengthLevel::Weak }
//! });
//!
//! engine.set_username("alice");
//! engine.set_password("correct horse battery");
//! engine.set_confirmation("correct horse battery");
//! engine.advance(Duration::from_millis(800));
//!
//! assert_eq!(engine.username_message(), "");
//! assert_eq!(engine.password_message(), "");
//! assert!(engine.is_valid());
//! ```

pub mod config;
pub mod messages;
pub mod rules;
pub mod strength;
pub mod validator;

pub use config::DebouncePolicy;
pub use rules::PasswordCheck;
#[cfg(feature = "zxcvbn")]
pub use strength::ZxcvbnClassifier;
pub use strength::{StrengthClassifier, StrengthLevel};
pub use validator::{OutputSnapshot, SignupValidator};

pub use signalform_core::Subscription;
