//! Ordinal intensity scale shared by the cloudiness and precipitation chains.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-level intensity scale.
///
/// Ordering follows the integer rank, so `Absent < Light < Moderate < Heavy`.
/// The same scale describes cloud cover and downfall amount; the Markov chains
/// reason about ranks (differences, monotonic runs), never about the names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Clear sky / no downfall
    Absent = 0,
    /// Light cover or light downfall
    Light = 1,
    /// Moderate cover or moderate downfall
    Moderate = 2,
    /// Dense cover or heavy downfall
    Heavy = 3,
}

impl Severity {
    /// Number of states on the scale.
    pub const COUNT: usize = 4;

    /// Every severity in rank order.
    pub const ALL: [Severity; Severity::COUNT] = [
        Severity::Absent,
        Severity::Light,
        Severity::Moderate,
        Severity::Heavy,
    ];

    /// Integer rank (0-3)
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Severity for a rank, `None` when the rank is out of range.
    pub const fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Severity::Absent),
            1 => Some(Severity::Light),
            2 => Some(Severity::Moderate),
            3 => Some(Severity::Heavy),
            _ => None,
        }
    }

    /// Normalized intensity in `[0, 1]`.
    pub const fn numeric_value(self) -> f32 {
        match self {
            Severity::Absent => 0.00,
            Severity::Light => 0.33,
            Severity::Moderate => 0.66,
            Severity::Heavy => 1.00,
        }
    }

    /// Absolute rank distance between two severities.
    #[inline]
    pub const fn difference(self, other: Severity) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    #[inline]
    pub const fn is_absent(self) -> bool {
        matches!(self, Severity::Absent)
    }

    /// Lowercase display name
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Absent => "none",
            Severity::Light => "light",
            Severity::Moderate => "moderate",
            Severity::Heavy => "heavy",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order_matches_enum_order() {
        for window in Severity::ALL.windows(2) {
            assert!(window[0] < window[1]);
            assert_eq!(window[0].rank() + 1, window[1].rank());
        }
    }

    #[test]
    fn test_from_rank() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_rank(usize::from(severity.rank())), Some(severity));
        }
        assert_eq!(Severity::from_rank(4), None);
    }

    #[test]
    fn test_difference_is_symmetric() {
        assert_eq!(Severity::Absent.difference(Severity::Heavy), 3);
        assert_eq!(Severity::Heavy.difference(Severity::Absent), 3);
        assert_eq!(Severity::Moderate.difference(Severity::Moderate), 0);
    }

    #[test]
    fn test_numeric_value_is_increasing() {
        let values = Severity::ALL.map(Severity::numeric_value);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(values[0], 0.0);
        assert_eq!(values[3], 1.0);
    }
}
