//! Sources of weather episodes.

use crate::core_types::Episode;
use crate::error::WeatherError;

/// Anything that yields an endless sequence of weather episodes.
///
/// [`WeatherGenerator`](crate::WeatherGenerator) is the shipped implementation;
/// hosts can plug in scripted or recorded weather through the same seam.
pub trait WeatherConditionProvider {
    /// Produce the episode that follows the previous one.
    ///
    /// # Errors
    ///
    /// Implementation-specific; the generator only fails with
    /// [`WeatherError::DegenerateDistribution`].
    fn next_episode(&mut self) -> Result<Episode, WeatherError>;

    /// Human-readable name for logs and debug overlays.
    fn display_name(&self) -> &str;
}
