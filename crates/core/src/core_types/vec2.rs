//! Vector type alias for 2D lattice velocities.

use nalgebra::Vector2;

/// 2D vector type for macroscopic velocities.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used for the velocity
/// field and for moving-equilibrium initial conditions.
pub type Vec2 = Vector2<f32>;
