#![forbid(unsafe_code)]

//! Pure judgments over quiescent field values, and the prioritized
//! password classification.
//!
//! Every function here is total and synchronous: empty strings, unicode of
//! any shape, and any combination of judgments have defined outcomes.

use unicode_segmentation::UnicodeSegmentation;

use crate::strength::StrengthLevel;

/// Minimum username length, counted in user-perceived characters
/// (extended grapheme clusters), not bytes or code points.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// True iff the password has zero length.
#[must_use]
pub fn is_password_empty(password: &str) -> bool {
    password.is_empty()
}

/// True iff password and confirmation are exactly equal: case-sensitive,
/// no trimming, no normalization.
#[must_use]
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}

/// True iff the level satisfies the acceptance policy.
#[must_use]
pub fn is_strong_enough(level: StrengthLevel) -> bool {
    level.is_strong_enough()
}

/// True iff the username has at least [`MIN_USERNAME_LENGTH`] graphemes.
#[must_use]
pub fn is_username_valid(username: &str) -> bool {
    username.graphemes(true).take(MIN_USERNAME_LENGTH).count() == MIN_USERNAME_LENGTH
}

/// Prioritized classification of the password state.
///
/// Exactly one variant holds at any observation instant; resolution order is
/// fixed (see [`resolve`](Self::resolve)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordCheck {
    Valid,
    Empty,
    NoMatch,
    NotStrongEnough,
}

impl PasswordCheck {
    /// Resolve the three password judgments into one classification.
    ///
    /// Priority order, first match wins: emptiness dominates everything
    /// (a missing password gets no other feedback), mismatch is reported
    /// before weakness (a mismatched pair cannot be fixed by strengthening
    /// alone), weakness comes last.
    #[must_use]
    pub fn resolve(is_empty: bool, passwords_match: bool, strong_enough: bool) -> Self {
        if is_empty {
            Self::Empty
        } else if !passwords_match {
            Self::NoMatch
        } else if !strong_enough {
            Self::NotStrongEnough
        } else {
            Self::Valid
        }
    }

    /// Whether this classification accepts the password.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
