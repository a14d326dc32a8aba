//! Weather snapshots and the episodes the generator emits.

use crate::core_types::downfall::{DownfallCondition, NO_DOWNFALL};
use crate::core_types::likelihood::{COMMON, IMPOSSIBLE, RARE, UNCOMMON, VERY_UNCOMMON};
use crate::core_types::severity::Severity;
use crate::core_types::vec2::Vec2;
use crate::error::WeatherError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable weather snapshot: cloud cover, downfall and wind.
///
/// # Example
/// ```
/// use weather_gen_core::{DownfallCondition, DownfallKind, Severity, Vec2, WeatherCondition};
///
/// let drizzle = DownfallCondition::new(Severity::Light, DownfallKind::Rain, false).unwrap();
/// let condition = WeatherCondition::new(Severity::Moderate, drizzle, Vec2::new(0.3, 0.1));
///
/// assert_eq!(condition.to_string(), "Moderately clouded and light rain");
/// assert!(condition.is_possible());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    cloudiness: Severity,
    downfall: DownfallCondition,
    wind: Vec2,
}

impl WeatherCondition {
    #[must_use]
    pub fn new(cloudiness: Severity, downfall: DownfallCondition, wind: Vec2) -> Self {
        Self {
            cloudiness,
            downfall,
            wind,
        }
    }

    /// Cloudless, calm, dry.
    #[must_use]
    pub fn clear() -> Self {
        Self::new(Severity::Absent, NO_DOWNFALL, Vec2::zeros())
    }

    #[inline]
    pub const fn cloudiness(&self) -> Severity {
        self.cloudiness
    }

    #[inline]
    pub const fn downfall(&self) -> DownfallCondition {
        self.downfall
    }

    /// Horizontal wind vector
    #[inline]
    pub fn wind(&self) -> Vec2 {
        self.wind
    }

    /// Copy of this condition with a different downfall.
    #[must_use]
    pub fn with_downfall(self, downfall: DownfallCondition) -> Self {
        Self { downfall, ..self }
    }

    /// Relative likelihood of this cloud/downfall pairing.
    ///
    /// Combines how well the downfall fits the cloud cover, the downfall's own
    /// likelihood and a prior on the cloud cover itself. Wind does not enter.
    /// Downfall from a clear sky is [`IMPOSSIBLE`].
    pub fn likelihood(&self) -> f32 {
        let amount = self.downfall.severity();
        let fit = match self.cloudiness {
            Severity::Absent => {
                if amount.is_absent() {
                    COMMON
                } else {
                    IMPOSSIBLE
                }
            }
            Severity::Light => match amount {
                Severity::Heavy => RARE,
                Severity::Moderate => VERY_UNCOMMON,
                Severity::Absent | Severity::Light => COMMON,
            },
            Severity::Moderate => match (amount, self.downfall.has_thunder()) {
                (Severity::Heavy, true) => VERY_UNCOMMON,
                (Severity::Heavy, false) => UNCOMMON,
                _ => COMMON,
            },
            Severity::Heavy => COMMON,
        };

        fit * self.downfall.likelihood() * cloud_prior(self.cloudiness)
    }

    pub fn is_possible(&self) -> bool {
        self.likelihood() > IMPOSSIBLE
    }

    /// Every cloud/downfall pairing with non-zero likelihood, with calm wind.
    pub fn all_possible() -> Vec<WeatherCondition> {
        let downfalls = DownfallCondition::all();
        Severity::ALL
            .iter()
            .flat_map(|&cloudiness| {
                downfalls
                    .iter()
                    .map(move |&downfall| {
                        WeatherCondition::new(cloudiness, downfall, Vec2::zeros())
                    })
            })
            .filter(WeatherCondition::is_possible)
            .collect()
    }

    fn cloudiness_phrase(&self) -> &'static str {
        match self.cloudiness {
            Severity::Absent => "Clear sky",
            Severity::Light => "Lightly clouded",
            Severity::Moderate => "Moderately clouded",
            Severity::Heavy => "Densely clouded",
        }
    }
}

fn cloud_prior(cloudiness: Severity) -> f32 {
    match cloudiness {
        Severity::Absent | Severity::Heavy => UNCOMMON,
        Severity::Light | Severity::Moderate => COMMON,
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cloudiness_phrase())?;
        if self.downfall.is_falling() {
            write!(f, " and {}", self.downfall)?;
        }
        Ok(())
    }
}

/// A weather condition together with how long it lasts.
///
/// Duration is always finite and strictly positive, including after
/// deserialization; the unit is whatever the host uses for its clock (the
/// default configuration assumes milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEpisode", into = "RawEpisode")]
pub struct Episode {
    condition: WeatherCondition,
    duration: f32,
}

impl Episode {
    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidConstruction`] when `duration` is not a
    /// finite positive number.
    pub fn new(condition: WeatherCondition, duration: f32) -> Result<Self, WeatherError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(WeatherError::InvalidConstruction {
                parameter: "duration",
                reason: format!("must be finite and positive, got {duration}"),
            });
        }
        Ok(Self {
            condition,
            duration,
        })
    }

    #[inline]
    pub const fn condition(&self) -> &WeatherCondition {
        &self.condition
    }

    #[inline]
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Same duration, different condition.
    #[must_use]
    pub fn with_condition(self, condition: WeatherCondition) -> Self {
        Self { condition, ..self }
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.condition, self.duration)
    }
}

/// Unvalidated wire form of [`Episode`].
#[derive(Serialize, Deserialize)]
struct RawEpisode {
    condition: WeatherCondition,
    duration: f32,
}

impl TryFrom<RawEpisode> for Episode {
    type Error = WeatherError;

    fn try_from(raw: RawEpisode) -> Result<Self, Self::Error> {
        Episode::new(raw.condition, raw.duration)
    }
}

impl From<Episode> for RawEpisode {
    fn from(episode: Episode) -> Self {
        RawEpisode {
            condition: episode.condition,
            duration: episode.duration,
        }
    }
}
