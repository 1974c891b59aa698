#![forbid(unsafe_code)]

//! Debounce windows for the validation pipeline.

use std::time::Duration;

/// Per-stage debounce windows.
///
/// The defaults deliberately split into two tiers: equality and strength
/// checks use a short window so they feel responsive mid-typing, while the
/// emptiness and username-length checks use a longer window so errors do
/// not flash between keystrokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebouncePolicy {
    /// Quiet period before the username-length check re-evaluates.
    /// Default: 800ms.
    pub username: Duration,

    /// Quiet period before the password-emptiness check re-evaluates.
    /// Default: 800ms.
    pub password_empty: Duration,

    /// Quiet period before the password is re-classified for strength.
    /// Default: 200ms.
    pub strength: Duration,

    /// Quiet period before the password/confirmation pair is re-compared.
    /// Default: 200ms.
    pub equality: Duration,
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self {
            username: Duration::from_millis(800),
            password_empty: Duration::from_millis(800),
            strength: Duration::from_millis(200),
            equality: Duration::from_millis(200),
        }
    }
}

impl DebouncePolicy {
    /// A policy with the same window on every stage. Handy in tests and in
    /// hosts that want uniform latency.
    #[must_use]
    pub fn uniform(window: Duration) -> Self {
        Self {
            username: window,
            password_empty: window,
            strength: window,
            equality: window,
        }
    }

    /// Override the username window.
    #[must_use]
    pub fn with_username(mut self, window: Duration) -> Self {
        self.username = window;
        self
    }

    /// Override the password-emptiness window.
    #[must_use]
    pub fn with_password_empty(mut self, window: Duration) -> Self {
        self.password_empty = window;
        self
    }

    /// Override the strength window.
    #[must_use]
    pub fn with_strength(mut self, window: Duration) -> Self {
        self.strength = window;
        self
    }

    /// Override the equality window.
    #[must_use]
    pub fn with_equality(mut self, window: Duration) -> Self {
        self.equality = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_two_tiers() {
        let policy = DebouncePolicy::default();
        assert_eq!(policy.username, Duration::from_millis(800));
        assert_eq!(policy.password_empty, Duration::from_millis(800));
        assert_eq!(policy.strength, Duration::from_millis(200));
        assert_eq!(policy.equality, Duration::from_millis(200));
    }

    #[test]
    fn uniform_and_overrides() {
        let policy = DebouncePolicy::uniform(Duration::from_millis(50))
            .with_username(Duration::from_millis(100));
        assert_eq!(policy.username, Duration::from_millis(100));
        assert_eq!(policy.password_empty, Duration::from_millis(50));
        assert_eq!(policy.strength, Duration::from_millis(50));
        assert_eq!(policy.equality, Duration::from_millis(50));
    }
}
