//! Qualitative likelihood levels used to rank weather combinations.
//!
//! These are relative weights, not probabilities: a combination rated
//! `COMMON` is expected roughly ten times as often as one rated `RARE`.
//! `IMPOSSIBLE` marks combinations that must never be produced.

/// Everyday combination
pub const COMMON: f32 = 1.0;

/// Seen regularly but not most of the time
pub const UNCOMMON: f32 = 0.6;

pub const VERY_UNCOMMON: f32 = 0.3;

pub const RARE: f32 = 0.1;

/// Physically implausible combination
pub const IMPOSSIBLE: f32 = 0.0;
