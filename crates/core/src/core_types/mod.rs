//! Core types and utilities

pub mod condition;
pub mod downfall;
pub mod likelihood;
pub mod severity;
pub mod vec2;

pub use condition::{Episode, WeatherCondition};
pub use downfall::{DownfallCondition, DownfallKind, NO_DOWNFALL};
pub use severity::Severity;
pub use vec2::Vec2;
