#![forbid(unsafe_code)]

//! User-facing message projection. Table-driven and total: every judgment
//! maps to exactly one string, with the empty string meaning "no error".

use crate::rules::PasswordCheck;

pub const USERNAME_TOO_SHORT: &str = "User name must at least have 3 characters";
pub const PASSWORD_EMPTY: &str = "Password must not be empty";
pub const PASSWORDS_DONT_MATCH: &str = "Passwords don't match";
pub const PASSWORD_TOO_WEAK: &str = "Password not strong enough";
pub const NO_ERROR: &str = "";

/// Message for the username field.
#[must_use]
pub fn username_message(valid: bool) -> &'static str {
    if valid { NO_ERROR } else { USERNAME_TOO_SHORT }
}

/// Message for the password fields.
#[must_use]
pub fn password_message(check: PasswordCheck) -> &'static str {
    match check {
        PasswordCheck::Empty => PASSWORD_EMPTY,
        PasswordCheck::NoMatch => PASSWORDS_DONT_MATCH,
        PasswordCheck::NotStrongEnough => PASSWORD_TOO_WEAK,
        PasswordCheck::Valid => NO_ERROR,
    }
}
