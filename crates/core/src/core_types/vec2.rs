//! Vector type alias for horizontal wind.

use nalgebra::Vector2;

/// 2D vector type for wind on the horizontal plane.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`; `x` and `y` are the
/// two horizontal components, magnitude is `norm()`.
pub type Vec2 = Vector2<f32>;
