//! Order-2 Markov chains for cloud cover and precipitation.
//!
//! The chains share one sampling engine ([`transition`]) and differ only in
//! their weighting functions, [`cloud_weight`] and [`precipitation_weight`].
//! Weights are unnormalized products of independent factors.

pub mod cloud;
pub mod history;
pub mod precipitation;
pub mod sampler;

pub use cloud::{cloud_prior, cloud_weight};
pub use history::History;
pub use precipitation::{cloud_cap, precipitation_prior, precipitation_weight};
pub use sampler::{sample_index, transition};

use crate::core_types::Severity;

/// True when `first`, `second`, `third` never change direction.
///
/// Flat runs count as monotonic in both directions.
#[inline]
pub fn is_monotonic(first: Severity, second: Severity, third: Severity) -> bool {
    (first <= second && second <= third) || (first >= second && second >= third)
}

/// True when two pairs move strictly in the same direction.
///
/// Used to reward downfall that tracks the cloud cover: `(a, b)` rising with
/// `(c, d)` rising, or both falling. A flat pair never follows.
#[inline]
pub fn follows(
    first_a: Severity,
    second_a: Severity,
    first_b: Severity,
    second_b: Severity,
) -> bool {
    (first_a > second_a && first_b > second_b) || (first_a < second_a && first_b < second_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Severity::{Absent, Heavy, Light, Moderate};

    #[test]
    fn test_is_monotonic() {
        assert!(is_monotonic(Absent, Light, Heavy));
        assert!(is_monotonic(Heavy, Heavy, Light));
        assert!(is_monotonic(Moderate, Moderate, Moderate));
        assert!(!is_monotonic(Light, Moderate, Light));
        assert!(!is_monotonic(Heavy, Absent, Light));
    }

    #[test]
    fn test_follows() {
        assert!(follows(Absent, Light, Light, Heavy));
        assert!(follows(Heavy, Moderate, Moderate, Absent));
        assert!(!follows(Absent, Light, Heavy, Light));
        assert!(!follows(Light, Light, Absent, Light));
    }
}
