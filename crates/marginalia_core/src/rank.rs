//! Validated review rank.

use marginalia_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// A review rank, constrained to the closed interval [0, 5].
///
/// Construction is the single enforcement point: a [`Rank`] in hand is
/// always in range, so storage writes never need to re-check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rank(i32);

impl Rank {
    /// Lowest allowed rank.
    pub const MIN: i32 = 0;
    /// Highest allowed rank.
    pub const MAX: i32 = 5;

    /// Create a rank, rejecting values outside [0, 5].
    #[track_caller]
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::new(ValidationErrorKind::RankOutOfRange(
                value,
            )))
        }
    }

    /// The raw rank value.
    pub fn get(self) -> i32 {
        self.0
    }

    /// All valid ranks in ascending order, for rank selection keyboards.
    pub fn all() -> impl Iterator<Item = Rank> {
        (Self::MIN..=Self::MAX).map(Rank)
    }
}

impl TryFrom<i32> for Rank {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Rank::new(value)
    }
}

impl From<Rank> for i32 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Rank::new(0).is_ok());
        assert!(Rank::new(5).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Rank::new(-1).is_err());
        assert!(Rank::new(6).is_err());
    }

    #[test]
    fn all_covers_range() {
        let ranks: Vec<i32> = Rank::all().map(Rank::get).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);
    }
}
