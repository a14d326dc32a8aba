//! Weather Generator Core Library
//!
//! A seeded, deterministic weather generator built from two coupled order-2
//! Markov chains (cloud cover and precipitation) and a correlated wind random
//! walk. Hosts poll it for episodes: a weather condition plus how long it lasts.
//!
//! ## Layers
//!
//! - [`core_types`]: severities, downfall and weather conditions, episodes
//! - [`markov`]: the generic transition sampler and the two weighting functions
//! - [`wind`]: the wind random walk
//! - [`generator`]: the orchestrator, its configuration and snapshots
//! - [`policy`]: temperature-based choice of rain, snow or hail
//! - [`timeline`]: host-side polling with overshoot carry and forced overrides

// Core types and utilities
pub mod core_types;
pub mod error;

// Stochastic processes
pub mod markov;
pub mod wind;

// Generation and host integration
pub mod generator;
pub mod policy;
pub mod provider;
pub mod timeline;

// Re-export core types
pub use core_types::likelihood;
pub use core_types::{
    DownfallCondition, DownfallKind, Episode, Severity, Vec2, WeatherCondition, NO_DOWNFALL,
};
pub use error::WeatherError;

// Re-export generation types
pub use generator::{
    GeneratorConfig, GeneratorState, PersistenceError, WeatherGenerator, DAY_LENGTH,
    WARM_UP_STEPS,
};
pub use policy::DownfallKindPolicy;
pub use provider::WeatherConditionProvider;
pub use timeline::WeatherTimeline;
pub use wind::WindProcess;
