//! Correlated wind random walk.
//!
//! Wind is sampled once per episode in polar form. The expected magnitude
//! mixes the new weather severity with the previous magnitude, and the
//! direction drifts by a normally distributed angle instead of jumping.

use crate::core_types::{Severity, Vec2};
use crate::markov::sampler::gaussian;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

/// Smallest magnitude a sampled wind may have, so its direction stays defined.
pub const MIN_WIND_MAGNITUDE: f32 = 0.001;

/// Share of the expected magnitude driven by the new weather severity.
const SEVERITY_SHARE: f32 = 0.75;
/// Share of the expected magnitude carried over from the previous wind.
const CARRY_OVER_SHARE: f32 = 0.25;
/// Combined severity rank (at most 6) is scaled by this to get wind strength.
const SEVERITY_SCALE: f32 = 8.0;
/// Standard deviation of the per-episode direction change, radians.
const ANGLE_STD_DEV: f32 = FRAC_PI_4;

/// Wind state: the vector produced by the previous step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindProcess {
    previous: Vec2,
}

impl WindProcess {
    /// Start from an explicit previous wind.
    pub fn from_previous(previous: Vec2) -> Self {
        Self { previous }
    }

    pub fn previous(&self) -> Vec2 {
        self.previous
    }

    /// Sample the wind for a step whose new states are `cloud` and `precipitation`.
    ///
    /// Consumes two normal draws from `rng`: magnitude first, then angle.
    /// The process itself is not advanced; build the next one with
    /// [`WindProcess::from_previous`].
    pub fn sample<R: Rng>(&self, cloud: Severity, precipitation: Severity, rng: &mut R) -> Vec2 {
        let cloud_rank = f32::from(cloud.rank());
        let combined = cloud_rank + f32::from(precipitation.rank());

        let expected_magnitude = SEVERITY_SHARE * combined / SEVERITY_SCALE
            + CARRY_OVER_SHARE * self.previous.norm();
        let std_dev = cloud_rank / SEVERITY_SCALE;

        let magnitude = gaussian(rng, expected_magnitude, std_dev)
            .abs()
            .max(MIN_WIND_MAGNITUDE);
        let angle = gaussian(rng, 0.0, ANGLE_STD_DEV) + self.previous.y.atan2(self.previous.x);

        Vec2::new(angle.cos() * magnitude, angle.sin() * magnitude)
    }
}

impl Default for WindProcess {
    /// Light breeze from the positive x axis.
    fn default() -> Self {
        Self::from_previous(Vec2::new(1.0, 0.0))
    }
}
