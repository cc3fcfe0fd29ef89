//! Field statistics and display helpers
//!
//! Reductions accumulate in `f64` so that mass checks on large grids are not
//! dominated by `f32` summation error.

use crate::core_types::Vec2;
use crate::solver::{PopulationGrid, ScalarField, VelocityField};
use rayon::prelude::*;

/// Summary statistics of a scalar field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    /// Smallest cell value
    pub min: f32,
    /// Largest cell value
    pub max: f32,
    /// Mean cell value
    pub mean: f64,
    /// Sum over all cells
    pub total: f64,
}

impl FieldStats {
    /// Compute statistics of `field`
    #[must_use]
    pub fn from_field(field: &ScalarField) -> Self {
        let (min, max, total) = field
            .as_slice()
            .par_iter()
            .fold(
                || (f32::INFINITY, f32::NEG_INFINITY, 0.0_f64),
                |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + f64::from(v)),
            )
            .reduce(
                || (f32::INFINITY, f32::NEG_INFINITY, 0.0_f64),
                |a, b| (a.0.min(b.0), a.1.max(b.1), a.2 + b.2),
            );

        let mean = if field.is_empty() {
            0.0
        } else {
            total / field.len() as f64
        };

        Self {
            min,
            max,
            mean,
            total,
        }
    }
}

/// Sum of every population in `grid`
#[must_use]
pub fn total_mass(grid: &PopulationGrid) -> f64 {
    grid.as_slice()
        .par_iter()
        .map(|cell| cell.iter().map(|&f| f64::from(f)).sum::<f64>())
        .sum()
}

/// Total kinetic energy `Σ ½ ρ |u|²`
#[must_use]
pub fn kinetic_energy(density: &ScalarField, velocity: &VelocityField) -> f64 {
    density
        .as_slice()
        .par_iter()
        .zip(velocity.as_slice().par_iter())
        .map(|(&rho, u)| 0.5 * f64::from(rho) * f64::from(u.norm_squared()))
        .sum()
}

/// Largest velocity magnitude in the field
#[must_use]
pub fn max_speed(velocity: &VelocityField) -> f32 {
    velocity
        .as_slice()
        .par_iter()
        .map(Vec2::norm)
        .reduce(|| 0.0, f32::max)
}

/// Map density to `[0, 1]` for colour-mapping
///
/// Output is row-major with the y axis flipped, so row 0 of the output is the
/// last row of the field (bottom-up texture order). A constant field maps to
/// all zeros.
#[must_use]
pub fn normalize_for_display(density: &ScalarField) -> Vec<f32> {
    let stats = FieldStats::from_field(density);
    let range = stats.max - stats.min;
    let (width, height) = (density.width, density.height);
    let mut out = vec![0.0; density.len()];

    if width == 0 || height == 0 || range <= 0.0 || !range.is_finite() {
        return out;
    }

    let src = density.as_slice();
    out.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, dst)| {
            let y = height - 1 - row;
            for (x, value) in dst.iter_mut().enumerate() {
                *value = (src[y * width + x] - stats.min) / range;
            }
        });
    out
}
