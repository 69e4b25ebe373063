use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProficiencyError {
    #[error("proficiency must be between 1 and 5, got {0}")]
    OutOfRange(i64),
}

/// Self-rated mastery of a subject, from 1 (weak) to 5 (strong).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Proficiency(u8);

impl Proficiency {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a validated proficiency.
    ///
    /// # Errors
    ///
    /// Returns `ProficiencyError::OutOfRange` if `value` is outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, ProficiencyError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ProficiencyError::OutOfRange(i64::from(value)))
        }
    }

    /// Creates a proficiency, pulling out-of-range input to the nearest bound.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(bounded).unwrap_or(Self::MAX))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Weekly study hours for a subject at this proficiency: `(6 - p) * 2`.
    #[must_use]
    pub fn weekly_hours(self) -> u32 {
        (6 - u32::from(self.0)) * 2
    }

    /// Anything below 3 is considered weak enough to warrant extra time.
    #[must_use]
    pub fn needs_more_time(self) -> bool {
        self.0 < 3
    }
}

impl TryFrom<i64> for Proficiency {
    type Error = ProficiencyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ProficiencyError::OutOfRange(value))
            .and_then(Self::new)
    }
}

impl fmt::Debug for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proficiency({})", self.0)
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_decrease_linearly_with_proficiency() {
        let hours: Vec<u32> = (1..=5)
            .map(|p| Proficiency::new(p).unwrap().weekly_hours())
            .collect();
        assert_eq!(hours, vec![10, 8, 6, 4, 2]);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(Proficiency::new(0), Err(ProficiencyError::OutOfRange(0)));
        assert_eq!(Proficiency::new(6), Err(ProficiencyError::OutOfRange(6)));
        assert_eq!(
            Proficiency::try_from(-3),
            Err(ProficiencyError::OutOfRange(-3))
        );
        assert_eq!(
            Proficiency::try_from(300),
            Err(ProficiencyError::OutOfRange(300))
        );
    }

    #[test]
    fn clamped_pulls_to_bounds() {
        assert_eq!(Proficiency::clamped(-10).value(), 1);
        assert_eq!(Proficiency::clamped(3).value(), 3);
        assert_eq!(Proficiency::clamped(99).value(), 5);
    }

    #[test]
    fn boundary_at_three_is_not_weak() {
        assert!(Proficiency::new(2).unwrap().needs_more_time());
        assert!(!Proficiency::new(3).unwrap().needs_more_time());
    }
}
