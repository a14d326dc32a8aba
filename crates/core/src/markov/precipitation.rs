//! Transition weights for the precipitation chain.
//!
//! Order 2 in its own history and additionally conditioned on the last two
//! cloud states. Every rule is a multiplicative factor; only "nothing falls
//! from a clear sky" is a hard zero.

use crate::core_types::Severity;
use crate::markov::{follows, is_monotonic, History};

/// Per-step decay for downfall more severe than the current cloud cover allows.
const CLOUD_CAP_DECAY: f32 = 0.8;
/// Decay for steps other than a single-rank change.
const STEP_DECAY: f32 = 0.66;
const TREND_BREAK_PENALTY: f32 = 0.5;
/// Bonus when downfall moves in the same direction as the clouds.
const FOLLOW_CLOUDS_BONUS: f32 = 2.0;
/// Damping for downfall starting from dry weather.
const ONSET_DAMPING: f32 = 0.2;
/// Bonus for easing off once downfall has lasted two steps.
const EASE_OFF_BONUS: f32 = 1.5;

/// Prior on downfall amount.
pub const fn precipitation_prior(state: Severity) -> f32 {
    match state {
        Severity::Absent => 1.0,
        Severity::Light => 0.5,
        Severity::Moderate => 0.7,
        Severity::Heavy => 0.3,
    }
}

/// Prior on downfall amount given the current cloud cover.
///
/// Zero for any downfall under a clear sky. Otherwise decays with how far
/// the downfall falls short of the cloud cover, `0.8^max(0, cloud - state)`.
pub fn cloud_cap(state: Severity, cloud_current: Severity) -> f32 {
    if cloud_current.is_absent() && !state.is_absent() {
        return 0.0;
    }
    let shortfall = cloud_current.rank().saturating_sub(state.rank());
    CLOUD_CAP_DECAY.powi(i32::from(shortfall))
}

/// Unnormalized weight of moving the precipitation chain to `next`.
///
/// `clouds` must already contain the cloud state chosen for this step.
///
/// # Example
/// ```
/// use weather_gen_core::markov::{precipitation_weight, History};
/// use weather_gen_core::Severity;
///
/// let clear = History::filled(Severity::Absent);
/// let dry = History::filled(Severity::Absent);
/// assert_eq!(precipitation_weight(&clear, &dry, Severity::Heavy), 0.0);
/// assert!(precipitation_weight(&clear, &dry, Severity::Absent) > 0.0);
/// ```
pub fn precipitation_weight(clouds: &History<2>, history: &History<2>, next: Severity) -> f32 {
    let (cloud_previous, cloud_current) = (clouds.previous(), clouds.current());
    let (previous, current) = (history.previous(), history.current());

    let step = i32::from(next.difference(current)) - 1;
    let mut weight = precipitation_prior(next)
        * cloud_cap(next, cloud_current)
        * STEP_DECAY.powi(step.abs());

    if !is_monotonic(previous, current, next) {
        weight *= TREND_BREAK_PENALTY;
    }
    if follows(cloud_previous, cloud_current, previous, current) {
        weight *= FOLLOW_CLOUDS_BONUS;
    }
    if current.is_absent() && !next.is_absent() {
        weight *= ONSET_DAMPING;
    }
    if !previous.is_absent() && !current.is_absent() && next < current {
        weight *= EASE_OFF_BONUS;
    }

    weight
}
