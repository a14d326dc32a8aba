//! Snapshots of generator state that survive a process restart.
//!
//! A snapshot records the configuration, the RNG stream position, both chain
//! histories and the previous wind. Restoring it yields a generator that
//! continues with exactly the episodes the original would have produced.

use crate::core_types::{Severity, Vec2};
use crate::error::WeatherError;
use crate::generator::config::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Serializable generator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorState {
    /// Parameters the generator was built with
    pub config: GeneratorConfig,
    /// Position in the RNG stream, in 32-bit words
    pub word_pos: u128,
    /// Cloud states, oldest first
    pub cloud_history: [Severity; 2],
    /// Precipitation states, oldest first
    pub precipitation_history: [Severity; 2],
    /// Wind produced by the last episode
    pub previous_wind: Vec2,
}

impl GeneratorState {
    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Save the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns error if the file cannot be written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// # Errors
    /// Returns [`PersistenceError::Json`] when `json` is not a valid snapshot
    pub fn from_json_str(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    /// Returns [`PersistenceError::Json`] if serialization fails
    pub fn to_json_string(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the snapshot describes a state a generator can be in.
    ///
    /// # Errors
    /// Returns [`WeatherError::InvalidConstruction`] for an invalid config or a
    /// non-finite wind vector
    pub fn validate(&self) -> Result<(), WeatherError> {
        self.config.validate()?;
        if !(self.previous_wind.x.is_finite() && self.previous_wind.y.is_finite()) {
            return Err(WeatherError::InvalidConstruction {
                parameter: "previous_wind",
                reason: format!(
                    "must be finite, got ({}, {})",
                    self.previous_wind.x, self.previous_wind.y
                ),
            });
        }
        Ok(())
    }
}

/// Errors that can occur with persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed fine but describes an impossible generator.
    #[error("snapshot is invalid: {0}")]
    InvalidState(#[from] WeatherError),
}
