//! The Markov-chain weather generator.
//!
//! Drives the cloud and precipitation chains once per episode, samples wind
//! from the new states and pairs the resulting condition with a random
//! duration. Everything is deterministic for a given seed and call count.

pub mod config;
pub mod persistence;

pub use config::{
    GeneratorConfig, DAY_LENGTH, DEFAULT_MEAN_DURATION, DEFAULT_SEED, MAX_MEAN_DURATION,
};
pub use persistence::{GeneratorState, PersistenceError};

use crate::core_types::{
    DownfallCondition, DownfallKind, Episode, Severity, WeatherCondition, NO_DOWNFALL,
};
use crate::error::WeatherError;
use crate::markov::{cloud_weight, precipitation_weight, sampler::gaussian, transition, History};
use crate::provider::WeatherConditionProvider;
use crate::wind::WindProcess;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Discarded steps run at construction so both histories hold a plausible
/// trajectory before the first visible episode.
pub const WARM_UP_STEPS: usize = 8;

/// Durations never drop below this fraction of the mean.
pub const MIN_DURATION_FRACTION: f32 = 1e-3;

/// Seeded weather generator producing [`Episode`]s.
///
/// Each call to [`WeatherGenerator::next_episode`] consumes, in order: one
/// uniform draw for the cloud chain, one for the precipitation chain, two
/// normal draws for wind magnitude and angle, and one normal draw for the
/// duration.
///
/// Non-zero precipitation is always reported as rain; use
/// [`DownfallKindPolicy`](crate::DownfallKindPolicy) to turn it into snow or
/// hail.
///
/// # Example
/// ```
/// use weather_gen_core::{WeatherGenerator, DAY_LENGTH};
///
/// let mut generator = WeatherGenerator::new(12354, DAY_LENGTH / 480.0).unwrap();
/// let episode = generator.next_episode().unwrap();
/// assert!(episode.duration() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct WeatherGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
    cloud_history: History<2>,
    precipitation_history: History<2>,
    wind: WindProcess,
}

impl WeatherGenerator {
    /// Create a generator and run its warm-up.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidConstruction`] when `mean_duration` is
    /// not finite and positive, or exceeds [`MAX_MEAN_DURATION`].
    pub fn new(seed: u64, mean_duration: f32) -> Result<Self, WeatherError> {
        Self::from_config(&GeneratorConfig::new(seed, mean_duration))
    }

    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidConstruction`] when the configuration
    /// fails [`GeneratorConfig::validate`].
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, WeatherError> {
        config.validate()?;

        let mut generator = Self {
            config: *config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            cloud_history: History::default(),
            precipitation_history: History::default(),
            wind: WindProcess::default(),
        };

        for _ in 0..WARM_UP_STEPS {
            generator.next_episode()?;
        }

        debug!(
            "Weather generator ready: seed={}, mean_duration={:.1}, clouds={:?}, rain={:?}",
            config.seed,
            config.mean_duration,
            generator.cloud_history.states(),
            generator.precipitation_history.states()
        );

        Ok(generator)
    }

    /// Rebuild a generator from a snapshot without re-running the warm-up.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidConstruction`] when the snapshot fails
    /// [`GeneratorState::validate`].
    pub fn restore(state: &GeneratorState) -> Result<Self, WeatherError> {
        state.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(state.config.seed);
        rng.set_word_pos(state.word_pos);

        debug!(
            "Weather generator restored: seed={}, word_pos={}",
            state.config.seed, state.word_pos
        );

        Ok(Self {
            config: state.config,
            rng,
            cloud_history: History::new(state.cloud_history),
            precipitation_history: History::new(state.precipitation_history),
            wind: WindProcess::from_previous(state.previous_wind),
        })
    }

    /// Capture everything needed to continue this generator later.
    pub fn snapshot(&self) -> GeneratorState {
        GeneratorState {
            config: self.config,
            word_pos: self.rng.get_word_pos(),
            cloud_history: self.cloud_history.states(),
            precipitation_history: self.precipitation_history.states(),
            previous_wind: self.wind.previous(),
        }
    }

    /// Advance both chains and the wind by one step.
    ///
    /// The new state is computed in full before anything is stored, so a
    /// failed call leaves the generator exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::DegenerateDistribution`] if a weighting
    /// function leaves no candidate. The shipped weights always leave one.
    pub fn next_episode(&mut self) -> Result<Episode, WeatherError> {
        let mut rng = self.rng.clone();

        let cloud_draw: f32 = rng.random();
        let (cloud, cloud_history) = transition(self.cloud_history, cloud_draw, cloud_weight)?;

        let precipitation_draw: f32 = rng.random();
        let (precipitation, precipitation_history) =
            transition(self.precipitation_history, precipitation_draw, |history, next| {
                precipitation_weight(&cloud_history, history, next)
            })?;

        let wind = self.wind.sample(cloud, precipitation, &mut rng);

        let downfall = if precipitation.is_absent() {
            NO_DOWNFALL
        } else {
            DownfallCondition::new(precipitation, DownfallKind::Rain, false)?
        };
        let condition = WeatherCondition::new(cloud, downfall, wind);
        let episode = Episode::new(condition, self.sample_duration(&mut rng))?;

        self.rng = rng;
        self.cloud_history = cloud_history;
        self.precipitation_history = precipitation_history;
        self.wind = WindProcess::from_previous(wind);

        trace!("Next weather episode: {}", episode);

        Ok(episode)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Most recent cloud state
    pub fn cloudiness(&self) -> Severity {
        self.cloud_history.current()
    }

    /// Most recent precipitation state
    pub fn precipitation(&self) -> Severity {
        self.precipitation_history.current()
    }

    /// `|N(mean, mean / 2)|`, floored to stay strictly positive.
    fn sample_duration<R: Rng>(&self, rng: &mut R) -> f32 {
        let mean = self.config.mean_duration;
        gaussian(rng, mean, mean / 2.0)
            .abs()
            .max(mean * MIN_DURATION_FRACTION)
    }
}

impl WeatherConditionProvider for WeatherGenerator {
    fn next_episode(&mut self) -> Result<Episode, WeatherError> {
        WeatherGenerator::next_episode(self)
    }

    fn display_name(&self) -> &str {
        "Markov chain weather generator"
    }
}
