#![forbid(unsafe_code)]

//! Password strength levels and the classifier boundary.
//!
//! The engine never scores passwords itself. Hosts supply a
//! [`StrengthClassifier`] — any pure, synchronous function from password
//! text to one of five ordered [`StrengthLevel`]s — and the engine only
//! consumes the ordering. The `zxcvbn` feature ships a ready-made
//! classifier backed by the zxcvbn estimator.

use std::fmt;

/// Password strength, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Reasonable,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    /// Map a five-point score (0..=4) onto a level.
    ///
    /// Out-of-range scores read as [`VeryWeak`](Self::VeryWeak): a
    /// misbehaving scorer fails toward "not strong enough", never toward
    /// accepting a password.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Reasonable,
            3 => Self::Strong,
            4 => Self::VeryStrong,
            _ => Self::VeryWeak,
        }
    }

    /// Whether this level satisfies the acceptance policy: `Reasonable` and
    /// above pass, `VeryWeak` and `Weak` do not.
    #[must_use]
    pub fn is_strong_enough(self) -> bool {
        self >= Self::Reasonable
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::VeryWeak => "very weak",
            Self::Weak => "weak",
            Self::Reasonable => "reasonable",
            Self::Strong => "strong",
            Self::VeryStrong => "very strong",
        };
        f.write_str(label)
    }
}

/// External collaborator that scores a password.
///
/// Implementations must be pure and synchronous: same input, same level, no
/// side effects. Any `Fn(&str) -> StrengthLevel` qualifies.
pub trait StrengthClassifier {
    fn classify(&self, password: &str) -> StrengthLevel;
}

impl<F> StrengthClassifier for F
where
    F: Fn(&str) -> StrengthLevel,
{
    fn classify(&self, password: &str) -> StrengthLevel {
        self(password)
    }
}

/// Classifier backed by the zxcvbn estimator.
///
/// zxcvbn's five-point score maps directly onto the five levels; any score
/// outside the known range reads as `VeryWeak`.
#[cfg(feature = "zxcvbn")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ZxcvbnClassifier;

#[cfg(feature = "zxcvbn")]
impl StrengthClassifier for ZxcvbnClassifier {
    fn classify(&self, password: &str) -> StrengthLevel {
        use zxcvbn::Score;
        match zxcvbn::zxcvbn(password, &[]).score() {
            Score::Zero => StrengthLevel::VeryWeak,
            Score::One => StrengthLevel::Weak,
            Score::Two => StrengthLevel::Reasonable,
            Score::Three => StrengthLevel::Strong,
            Score::Four => StrengthLevel::VeryStrong,
            _ => StrengthLevel::VeryWeak,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
