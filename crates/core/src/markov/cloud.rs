//! Transition weights for the cloudiness chain.
//!
//! Order 2: the weight of the next cloud state depends on the previous and the
//! current state. Small steps beat large jumps and continuing a trend beats
//! reversing it.

use crate::core_types::Severity;
use crate::markov::{is_monotonic, History};

/// Per-step decay for jumping away from the current cloud cover.
const STEP_DECAY: f32 = 0.75;

/// Factor applied when the next state reverses the current trend.
const TREND_BREAK_PENALTY: f32 = 0.25;

/// Prior on cloud cover: clear sky and dense overcast are discounted.
pub const fn cloud_prior(state: Severity) -> f32 {
    match state {
        Severity::Absent => 0.4,
        Severity::Light | Severity::Moderate => 1.0,
        Severity::Heavy => 0.6,
    }
}

/// Unnormalized weight of moving to `next` given the last two cloud states.
///
/// # Example
/// ```
/// use weather_gen_core::markov::{cloud_weight, History};
/// use weather_gen_core::Severity;
///
/// let rising = History::new([Severity::Light, Severity::Moderate]);
/// assert!(cloud_weight(&rising, Severity::Heavy) > cloud_weight(&rising, Severity::Light));
/// ```
pub fn cloud_weight(history: &History<2>, next: Severity) -> f32 {
    let previous = history.previous();
    let current = history.current();

    let trend = if is_monotonic(previous, current, next) {
        1.0
    } else {
        TREND_BREAK_PENALTY
    };

    cloud_prior(next) * STEP_DECAY.powi(i32::from(next.difference(current))) * trend
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_continuing_trend_beats_reversal() {
        let history = History::new([Severity::Light, Severity::Moderate]);
        let heavy = cloud_weight(&history, Severity::Heavy);
        let light = cloud_weight(&history, Severity::Light);

        // 0.6 * 0.75 vs 1.0 * 0.75 * 0.25
        assert_relative_eq!(heavy, 0.45, epsilon = 1e-6);
        assert_relative_eq!(light, 0.1875, epsilon = 1e-6);
        assert!(heavy > light);
    }

    #[test]
    fn test_staying_put_has_no_decay() {
        let history = History::filled(Severity::Moderate);
        assert_relative_eq!(cloud_weight(&history, Severity::Moderate), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_large_jumps_decay_geometrically() {
        let history = History::filled(Severity::Absent);
        let one_step = cloud_weight(&history, Severity::Light);
        let two_steps = cloud_weight(&history, Severity::Moderate);
        assert_relative_eq!(two_steps / one_step, STEP_DECAY, epsilon = 1e-6);
    }

    #[test]
    fn test_every_history_leaves_a_candidate() {
        for previous in Severity::ALL {
            for current in Severity::ALL {
                let history = History::new([previous, current]);
                let weights = Severity::ALL.map(|next| cloud_weight(&history, next));
                assert!(weights.iter().all(|w| *w > 0.0));
            }
        }
    }
}
