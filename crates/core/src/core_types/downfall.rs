//! Downfall (precipitation) kinds and validated downfall conditions.

use crate::core_types::likelihood::{COMMON, IMPOSSIBLE, RARE, UNCOMMON, VERY_UNCOMMON};
use crate::core_types::severity::Severity;
use crate::error::WeatherError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical type of downfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DownfallKind {
    /// Nothing falls
    None,
    Rain,
    Hail,
    Snow,
}

impl DownfallKind {
    /// Every kind, `None` first.
    pub const ALL: [DownfallKind; 4] = [
        DownfallKind::None,
        DownfallKind::Rain,
        DownfallKind::Hail,
        DownfallKind::Snow,
    ];

    /// Lowercase display name
    pub const fn name(self) -> &'static str {
        match self {
            DownfallKind::None => "none",
            DownfallKind::Rain => "rain",
            DownfallKind::Hail => "hail",
            DownfallKind::Snow => "snow",
        }
    }
}

impl fmt::Display for DownfallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated `(severity, kind, thunder)` triple.
///
/// Invariants, checked by [`DownfallCondition::new`] and on deserialization:
/// - thunder only comes with a non-absent severity
/// - absent severity has kind `None`
///
/// A falling downfall of kind `None` is constructible but [`IMPOSSIBLE`], so
/// the generator never emits one and [`DownfallCondition::all`] leaves it out.
///
/// Fields are private so a constructed value always satisfies them. Two
/// conditions with equal fields are the same condition; there is no identity
/// beyond value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDownfall", into = "RawDownfall")]
pub struct DownfallCondition {
    severity: Severity,
    kind: DownfallKind,
    thunder: bool,
}

/// Nothing falls from the sky.
pub const NO_DOWNFALL: DownfallCondition = DownfallCondition {
    severity: Severity::Absent,
    kind: DownfallKind::None,
    thunder: false,
};

impl DownfallCondition {
    /// Build a downfall condition, rejecting illegal combinations.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidCombination`] when thunder or a real
    /// kind is paired with absent severity.
    ///
    /// # Example
    /// ```
    /// use weather_gen_core::{DownfallCondition, DownfallKind, Severity};
    ///
    /// let storm = DownfallCondition::new(Severity::Heavy, DownfallKind::Rain, true).unwrap();
    /// assert_eq!(storm.to_string(), "heavy rain with thunder");
    ///
    /// assert!(DownfallCondition::new(Severity::Absent, DownfallKind::Snow, false).is_err());
    /// ```
    pub fn new(
        severity: Severity,
        kind: DownfallKind,
        thunder: bool,
    ) -> Result<Self, WeatherError> {
        if !severity.is_absent() || (kind == DownfallKind::None && !thunder) {
            Ok(Self {
                severity,
                kind,
                thunder,
            })
        } else {
            Err(WeatherError::InvalidCombination {
                severity,
                kind,
                thunder,
            })
        }
    }

    /// Same severity and thunder with a different kind.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidCombination`] if the new kind breaks the
    /// invariants (a real kind on an absent downfall).
    pub fn with_kind(self, kind: DownfallKind) -> Result<Self, WeatherError> {
        Self::new(self.severity, kind, self.thunder)
    }

    #[inline]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub const fn kind(&self) -> DownfallKind {
        self.kind
    }

    #[inline]
    pub const fn has_thunder(&self) -> bool {
        self.thunder
    }

    /// True when something is falling.
    #[inline]
    pub const fn is_falling(&self) -> bool {
        !self.severity.is_absent()
    }

    /// Relative likelihood of this downfall, independent of cloud cover.
    ///
    /// Rain and snow are everyday events, hail is unusual. Thunder makes rain
    /// uncommon and snow or hail rare. Something falling with kind `None` is
    /// [`IMPOSSIBLE`].
    pub const fn likelihood(&self) -> f32 {
        if self.is_falling() && matches!(self.kind, DownfallKind::None) {
            return IMPOSSIBLE;
        }
        match (self.kind, self.thunder) {
            (DownfallKind::None, _) | (DownfallKind::Rain | DownfallKind::Snow, false) => COMMON,
            (DownfallKind::Rain, true) => UNCOMMON,
            (DownfallKind::Hail, false) => VERY_UNCOMMON,
            (DownfallKind::Snow | DownfallKind::Hail, true) => RARE,
        }
    }

    /// Every constructible downfall condition with non-zero likelihood.
    pub fn all() -> Vec<DownfallCondition> {
        let mut conditions = Vec::new();
        for severity in Severity::ALL {
            for kind in DownfallKind::ALL {
                for thunder in [true, false] {
                    let condition = Self::new(severity, kind, thunder)
                        .ok()
                        .filter(|condition| condition.likelihood() > IMPOSSIBLE);
                    conditions.extend(condition);
                }
            }
        }
        conditions
    }
}

impl Default for DownfallCondition {
    fn default() -> Self {
        NO_DOWNFALL
    }
}

impl fmt::Display for DownfallCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_falling() {
            return f.write_str("no downfall");
        }

        write!(f, "{} {}", self.severity, self.kind)?;
        if self.thunder {
            f.write_str(" with thunder")?;
        }
        Ok(())
    }
}

/// Unvalidated wire form of [`DownfallCondition`].
#[derive(Serialize, Deserialize)]
struct RawDownfall {
    severity: Severity,
    kind: DownfallKind,
    #[serde(default)]
    thunder: bool,
}

impl TryFrom<RawDownfall> for DownfallCondition {
    type Error = WeatherError;

    fn try_from(raw: RawDownfall) -> Result<Self, Self::Error> {
        DownfallCondition::new(raw.severity, raw.kind, raw.thunder)
    }
}

impl From<DownfallCondition> for RawDownfall {
    fn from(condition: DownfallCondition) -> Self {
        RawDownfall {
            severity: condition.severity,
            kind: condition.kind,
            thunder: condition.thunder,
        }
    }
}
