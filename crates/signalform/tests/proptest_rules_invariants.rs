//! Property tests for the pure derivation rules and the password
//! classification priority.

#![forbid(unsafe_code)]

use proptest::prelude::*;
use signalform::rules::{is_password_empty, is_username_valid, passwords_match};
use signalform::{PasswordCheck, StrengthLevel};

proptest! {
    /// Emptiness is exactly the zero-length predicate, unicode included.
    #[test]
    fn emptiness_matches_length(password in any::<String>()) {
        prop_assert_eq!(is_password_empty(&password), password.is_empty());
    }

    /// Equality is exact string equality: no trimming, no normalization.
    #[test]
    fn equality_is_exact(password in any::<String>(), confirmation in any::<String>()) {
        prop_assert_eq!(
            passwords_match(&password, &confirmation),
            password == confirmation
        );
    }

    /// A string is always equal to itself.
    #[test]
    fn equality_is_reflexive(password in any::<String>()) {
        prop_assert!(passwords_match(&password, &password));
    }

    /// Emptiness dominates every other condition.
    #[test]
    fn empty_wins_over_everything(matches in any::<bool>(), strong in any::<bool>()) {
        prop_assert_eq!(
            PasswordCheck::resolve(true, matches, strong),
            PasswordCheck::Empty
        );
    }

    /// Mismatch is reported before weakness.
    #[test]
    fn mismatch_wins_over_weakness(strong in any::<bool>()) {
        prop_assert_eq!(
            PasswordCheck::resolve(false, false, strong),
            PasswordCheck::NoMatch
        );
    }

    /// Exactly one classification holds for any input combination.
    #[test]
    fn resolution_is_total_and_deterministic(
        is_empty in any::<bool>(),
        matches in any::<bool>(),
        strong in any::<bool>(),
    ) {
        let first = PasswordCheck::resolve(is_empty, matches, strong);
        let second = PasswordCheck::resolve(is_empty, matches, strong);
        prop_assert_eq!(first, second);
    }

    /// The score mapping is total and fails safe: anything above 4 reads as
    /// the weakest level.
    #[test]
    fn from_score_is_total(score in any::<u8>()) {
        let level = StrengthLevel::from_score(score);
        if score > 4 {
            prop_assert_eq!(level, StrengthLevel::VeryWeak);
        }
        prop_assert_eq!(level.is_strong_enough(), (2..=4).contains(&score));
    }

    /// ASCII usernames: grapheme count equals char count.
    #[test]
    fn ascii_username_length_is_char_count(username in "[a-zA-Z0-9_]{0,8}") {
        prop_assert_eq!(is_username_valid(&username), username.chars().count() >= 3);
    }
}
