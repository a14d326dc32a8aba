//! Choosing rain, snow or hail for a downfall.
//!
//! The precipitation chain only decides how much falls. What falls is a
//! separate policy layered on top, so hosts with a temperature model can turn
//! rain into snow or hail without touching the chains.

use crate::core_types::{DownfallCondition, DownfallKind, Episode, Severity};
use crate::error::WeatherError;
use serde::{Deserialize, Serialize};

/// Snow at or below freezing.
pub const DEFAULT_SNOW_AT_OR_BELOW: f32 = 0.0;

/// Heavy downfall turns to hail at or below this temperature.
pub const DEFAULT_HAIL_AT_OR_BELOW: f32 = 4.0;

/// Mapping from air temperature (°C) to downfall kind.
///
/// Policies never change severity or thunder, and an absent downfall stays
/// absent.
///
/// # Example
/// ```
/// use weather_gen_core::{DownfallCondition, DownfallKind, DownfallKindPolicy, Severity};
///
/// let policy = DownfallKindPolicy::temperature();
/// let rain = DownfallCondition::new(Severity::Light, DownfallKind::Rain, false).unwrap();
///
/// assert_eq!(policy.classify(rain, -3.0).unwrap().kind(), DownfallKind::Snow);
/// assert_eq!(policy.classify(rain, 15.0).unwrap().kind(), DownfallKind::Rain);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum DownfallKindPolicy {
    /// Every downfall is rain, whatever the temperature.
    #[default]
    AlwaysRain,
    /// Kind from temperature thresholds, checked in order:
    /// 1. `T <= snow_at_or_below` gives snow
    /// 2. heavy downfall with `T <= hail_at_or_below` gives hail
    /// 3. anything else is rain
    ///
    /// An unknown (NaN) temperature gives rain.
    Temperature {
        snow_at_or_below: f32,
        hail_at_or_below: f32,
    },
}

impl DownfallKindPolicy {
    /// Temperature policy with the default thresholds.
    pub fn temperature() -> Self {
        DownfallKindPolicy::Temperature {
            snow_at_or_below: DEFAULT_SNOW_AT_OR_BELOW,
            hail_at_or_below: DEFAULT_HAIL_AT_OR_BELOW,
        }
    }

    /// Kind for a downfall of `severity` at `temperature`.
    ///
    /// Returns [`DownfallKind::None`] for absent severity.
    pub fn kind_for(&self, severity: Severity, temperature: f32) -> DownfallKind {
        if severity.is_absent() {
            return DownfallKind::None;
        }

        match *self {
            DownfallKindPolicy::AlwaysRain => DownfallKind::Rain,
            DownfallKindPolicy::Temperature {
                snow_at_or_below,
                hail_at_or_below,
            } => {
                if temperature <= snow_at_or_below {
                    DownfallKind::Snow
                } else if severity == Severity::Heavy && temperature <= hail_at_or_below {
                    DownfallKind::Hail
                } else {
                    DownfallKind::Rain
                }
            }
        }
    }

    /// Re-classify a downfall's kind.
    ///
    /// # Errors
    ///
    /// Propagates [`WeatherError::InvalidCombination`]; it cannot occur for a
    /// valid input since the kind stays `None` exactly when severity is absent.
    pub fn classify(
        &self,
        downfall: DownfallCondition,
        temperature: f32,
    ) -> Result<DownfallCondition, WeatherError> {
        downfall.with_kind(self.kind_for(downfall.severity(), temperature))
    }

    /// Copy of `episode` with its downfall re-classified.
    ///
    /// Cloudiness, wind and duration are unchanged.
    ///
    /// # Errors
    ///
    /// See [`DownfallKindPolicy::classify`].
    pub fn apply(&self, episode: &Episode, temperature: f32) -> Result<Episode, WeatherError> {
        let condition = episode.condition();
        let downfall = self.classify(condition.downfall(), temperature)?;
        Ok(episode.with_condition(condition.with_downfall(downfall)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Vec2, WeatherCondition, NO_DOWNFALL};

    fn downfall(severity: Severity, thunder: bool) -> DownfallCondition {
        DownfallCondition::new(severity, DownfallKind::Rain, thunder).unwrap()
    }

    #[test]
    fn test_always_rain_ignores_temperature() {
        let policy = DownfallKindPolicy::AlwaysRain;
        for temperature in [-30.0, 0.0, 2.0, 35.0, f32::NAN] {
            let classified = policy
                .classify(downfall(Severity::Heavy, false), temperature)
                .unwrap();
            assert_eq!(classified.kind(), DownfallKind::Rain);
        }
    }

    #[test]
    fn test_temperature_thresholds() {
        let policy = DownfallKindPolicy::temperature();

        assert_eq!(policy.kind_for(Severity::Light, 0.0), DownfallKind::Snow);
        assert_eq!(policy.kind_for(Severity::Heavy, -5.0), DownfallKind::Snow);
        assert_eq!(policy.kind_for(Severity::Heavy, 4.0), DownfallKind::Hail);
        assert_eq!(policy.kind_for(Severity::Moderate, 4.0), DownfallKind::Rain);
        assert_eq!(policy.kind_for(Severity::Heavy, 4.5), DownfallKind::Rain);
        assert_eq!(policy.kind_for(Severity::Heavy, f32::NAN), DownfallKind::Rain);
    }

    #[test]
    fn test_absent_downfall_stays_absent() {
        let policy = DownfallKindPolicy::temperature();
        assert_eq!(policy.classify(NO_DOWNFALL, -20.0).unwrap(), NO_DOWNFALL);
    }

    #[test]
    fn test_kindless_downfall_gets_a_kind() {
        let kindless = DownfallCondition::new(Severity::Light, DownfallKind::None, false).unwrap();
        let classified = DownfallKindPolicy::AlwaysRain.classify(kindless, 10.0).unwrap();

        assert_eq!(classified, downfall(Severity::Light, false));
        assert!(classified.likelihood() > crate::likelihood::IMPOSSIBLE);
    }

    #[test]
    fn test_keeps_severity_and_thunder() {
        let policy = DownfallKindPolicy::temperature();
        let storm = downfall(Severity::Heavy, true);
        let hail = policy.classify(storm, 1.0).unwrap();

        assert_eq!(hail.kind(), DownfallKind::Hail);
        assert_eq!(hail.severity(), Severity::Heavy);
        assert!(hail.has_thunder());
    }

    #[test]
    fn test_apply_only_touches_downfall() {
        let condition = WeatherCondition::new(
            Severity::Heavy,
            downfall(Severity::Moderate, false),
            Vec2::new(0.5, 0.5),
        );
        let episode = Episode::new(condition, 90.0).unwrap();
        let snowy = DownfallKindPolicy::temperature().apply(&episode, -1.0).unwrap();

        assert_eq!(snowy.condition().downfall().kind(), DownfallKind::Snow);
        assert_eq!(snowy.condition().cloudiness(), Severity::Heavy);
        assert_eq!(snowy.condition().wind(), Vec2::new(0.5, 0.5));
        assert_eq!(snowy.duration(), 90.0);
    }

    #[test]
    fn test_serde_tagged_by_mode() {
        let json = serde_json::to_string(&DownfallKindPolicy::temperature()).unwrap();
        assert!(json.contains(r#""mode":"Temperature""#));

        let parsed: DownfallKindPolicy = serde_json::from_str(r#"{"mode":"AlwaysRain"}"#).unwrap();
        assert_eq!(parsed, DownfallKindPolicy::AlwaysRain);
    }
}
