//! Host-side polling of a weather provider.
//!
//! A host advances the timeline with its frame or tick delta; the timeline
//! asks the provider for a new episode whenever the active one runs out.

use crate::core_types::Episode;
use crate::error::WeatherError;
use crate::provider::WeatherConditionProvider;
use tracing::{debug, warn};

/// Upper bound on episodes polled by a single [`WeatherTimeline::update`].
///
/// Guards against a huge time jump (or tiny episode durations) stalling the
/// host in one update.
pub const MAX_EPISODES_PER_UPDATE: usize = 64;

/// The active episode and how long it has left.
///
/// # Example
/// ```
/// use weather_gen_core::{WeatherGenerator, WeatherTimeline};
///
/// let generator = WeatherGenerator::new(12354, 100.0).unwrap();
/// let mut timeline = WeatherTimeline::new(generator).unwrap();
///
/// let before = *timeline.current();
/// let changed = timeline.update(timeline.remaining() + 1.0).unwrap();
/// assert!(changed.is_some());
/// assert_ne!(*timeline.current(), before);
/// ```
#[derive(Debug)]
pub struct WeatherTimeline<P: WeatherConditionProvider> {
    provider: P,
    current: Episode,
    remaining: f32,
}

impl<P: WeatherConditionProvider> WeatherTimeline<P> {
    /// Start a timeline with the provider's next episode.
    ///
    /// # Errors
    ///
    /// Propagates the provider's error for the first episode.
    pub fn new(mut provider: P) -> Result<Self, WeatherError> {
        let current = provider.next_episode()?;
        debug!(
            "Weather timeline started from {}: {}",
            provider.display_name(),
            current
        );

        Ok(Self {
            remaining: current.duration(),
            current,
            provider,
        })
    }

    /// Advance time by `dt`.
    ///
    /// Returns the new active episode when at least one episode expired,
    /// `None` otherwise. Time left over from an expired episode is taken off
    /// the next one. Non-finite or non-positive `dt` is ignored.
    ///
    /// # Errors
    ///
    /// Propagates the provider's error. The expired episode stays active and
    /// the next update polls again.
    pub fn update(&mut self, dt: f32) -> Result<Option<&Episode>, WeatherError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Ok(None);
        }

        self.remaining -= dt;
        if self.remaining > 0.0 {
            return Ok(None);
        }

        let mut polled = 0;
        while self.remaining <= 0.0 {
            if polled == MAX_EPISODES_PER_UPDATE {
                warn!(
                    "Weather timeline skipped ahead: {} episodes expired in one update of {:.1}",
                    polled, dt
                );
                self.remaining = self.current.duration();
                break;
            }

            let next = self.provider.next_episode()?;
            self.remaining += next.duration();
            self.current = next;
            polled += 1;
        }

        debug!(
            "Weather changed: {} ({:.1} remaining)",
            self.current, self.remaining
        );

        Ok(Some(&self.current))
    }

    /// Replace the active episode immediately.
    ///
    /// The forced episode runs for its full duration, after which the
    /// provider is polled as usual.
    pub fn force(&mut self, episode: Episode) {
        debug!("Weather forced: {}", episode);
        self.remaining = episode.duration();
        self.current = episode;
    }

    pub fn current(&self) -> &Episode {
        &self.current
    }

    /// Time left on the active episode
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Severity, Vec2, WeatherCondition, NO_DOWNFALL};

    /// Cycles through fixed durations and counts polls.
    struct Scripted {
        durations: Vec<f32>,
        polls: usize,
    }

    impl Scripted {
        fn new(durations: &[f32]) -> Self {
            Self {
                durations: durations.to_vec(),
                polls: 0,
            }
        }
    }

    impl WeatherConditionProvider for Scripted {
        fn next_episode(&mut self) -> Result<Episode, WeatherError> {
            let duration = self.durations[self.polls % self.durations.len()];
            self.polls += 1;
            let condition = WeatherCondition::new(Severity::Light, NO_DOWNFALL, Vec2::zeros());
            Episode::new(condition, duration)
        }

        fn display_name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn test_no_poll_before_expiry() {
        let mut timeline = WeatherTimeline::new(Scripted::new(&[10.0])).unwrap();
        assert!(timeline.update(4.0).unwrap().is_none());
        assert!(timeline.update(5.0).unwrap().is_none());
        assert_eq!(timeline.provider().polls, 1);
        assert_eq!(timeline.remaining(), 1.0);
    }

    #[test]
    fn test_overshoot_carries_into_next_episode() {
        let mut timeline = WeatherTimeline::new(Scripted::new(&[10.0, 20.0])).unwrap();
        let next = timeline.update(13.0).unwrap().copied().unwrap();
        assert_eq!(next.duration(), 20.0);
        assert_eq!(timeline.remaining(), 17.0);
        assert_eq!(timeline.provider().polls, 2);
    }

    #[test]
    fn test_polls_once_per_expired_episode() {
        let mut timeline = WeatherTimeline::new(Scripted::new(&[5.0])).unwrap();
        timeline.update(12.0).unwrap();
        // first episode plus the two that expired at t=5 and t=10
        assert_eq!(timeline.provider().polls, 3);
        assert_eq!(timeline.remaining(), 3.0);
    }

    #[test]
    fn test_ignores_invalid_dt() {
        let mut timeline = WeatherTimeline::new(Scripted::new(&[5.0])).unwrap();
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(timeline.update(dt).unwrap().is_none());
        }
        assert_eq!(timeline.remaining(), 5.0);
    }

    #[test]
    fn test_huge_jump_is_capped() {
        let mut timeline = WeatherTimeline::new(Scripted::new(&[1.0])).unwrap();
        assert!(timeline.update(1e6).unwrap().is_some());
        assert_eq!(timeline.provider().polls, 1 + MAX_EPISODES_PER_UPDATE);
        assert_eq!(timeline.remaining(), 1.0);
    }

    #[test]
    fn test_forced_episode_runs_then_resumes() {
        let mut timeline = WeatherTimeline::new(Scripted::new(&[10.0])).unwrap();
        let storm = WeatherCondition::new(Severity::Heavy, NO_DOWNFALL, Vec2::new(2.0, 0.0));
        timeline.force(Episode::new(storm, 3.0).unwrap());

        assert_eq!(timeline.current().condition().cloudiness(), Severity::Heavy);
        assert!(timeline.update(2.0).unwrap().is_none());

        let resumed = timeline.update(2.0).unwrap().copied().unwrap();
        assert_eq!(resumed.condition().cloudiness(), Severity::Light);
        assert_eq!(timeline.provider_mut().polls, 2);
    }
}
