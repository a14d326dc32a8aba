//! Construction parameters for the weather generator.

use crate::error::WeatherError;
use crate::generator::persistence::PersistenceError;
use serde::{Deserialize, Serialize};

/// Length of one in-game day in milliseconds.
pub const DAY_LENGTH: f32 = 1_728_000.0;

/// Seed used by the default configuration.
pub const DEFAULT_SEED: u64 = 12354;

/// Default mean episode length: 480 episodes per day.
pub const DEFAULT_MEAN_DURATION: f32 = DAY_LENGTH / 480.0;

/// Largest accepted mean duration. Leaves headroom for `mean + mean / 2 * z`
/// to stay finite.
pub const MAX_MEAN_DURATION: f32 = f32::MAX / 16.0;

/// Seed and mean episode duration.
///
/// Missing fields fall back to their defaults when deserializing, so an empty
/// JSON object is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// RNG seed; equal seeds give equal episode sequences
    pub seed: u64,
    /// Mean episode duration, in the host's time unit
    pub mean_duration: f32,
}

impl GeneratorConfig {
    pub fn new(seed: u64, mean_duration: f32) -> Self {
        Self {
            seed,
            mean_duration,
        }
    }

    /// Check the parameters before a generator is built from them.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidConstruction`] when `mean_duration` is
    /// not finite, not strictly positive, or above [`MAX_MEAN_DURATION`].
    pub fn validate(&self) -> Result<(), WeatherError> {
        if !self.mean_duration.is_finite() || self.mean_duration <= 0.0 {
            return Err(WeatherError::InvalidConstruction {
                parameter: "mean_duration",
                reason: format!("must be finite and positive, got {}", self.mean_duration),
            });
        }
        if self.mean_duration > MAX_MEAN_DURATION {
            return Err(WeatherError::InvalidConstruction {
                parameter: "mean_duration",
                reason: format!(
                    "must be at most {MAX_MEAN_DURATION:e}, got {:e}",
                    self.mean_duration
                ),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Json`] for malformed JSON and
    /// [`PersistenceError::InvalidState`] when the parsed values fail
    /// [`GeneratorConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, PersistenceError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_MEAN_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.seed, 12354);
        assert_eq!(config.mean_duration, 3600.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_mean_duration() {
        for mean_duration in [0.0, -1.0, f32::NAN, f32::INFINITY, 3.0e38, f32::MAX] {
            let err = GeneratorConfig::new(1, mean_duration).validate().unwrap_err();
            assert!(matches!(
                err,
                WeatherError::InvalidConstruction {
                    parameter: "mean_duration",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_validate_accepts_upper_bound() {
        assert!(GeneratorConfig::new(1, MAX_MEAN_DURATION).validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GeneratorConfig::from_json_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.mean_duration, DEFAULT_MEAN_DURATION);

        assert_eq!(
            GeneratorConfig::from_json_str("{}").unwrap(),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        assert!(matches!(
            GeneratorConfig::from_json_str(r#"{"mean_duration": -5.0}"#),
            Err(PersistenceError::InvalidState(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_json_str("not json"),
            Err(PersistenceError::Json(_))
        ));
    }
}
