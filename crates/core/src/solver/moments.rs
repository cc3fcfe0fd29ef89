//! Macroscopic moment computation
//!
//! ```text
//! ρ = Σ_i f_i
//! u = (c / ρ) · Σ_i f_i e_i
//! ```
//!
//! Runs on post-streaming populations. A cell whose density is zero or
//! non-finite, or so small that `c / ρ` overflows, cannot be normalised; the
//! pass reports the lowest such cell in row-major order instead of writing a
//! non-finite velocity.

use super::fields::{PopulationGrid, ScalarField, VelocityField};
use crate::core_types::d2q9::E;
use crate::core_types::{Populations, Vec2};
use rayon::prelude::*;

/// A cell whose density cannot be used to normalise its momentum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnstableCell {
    /// Cell column
    pub x: usize,
    /// Cell row
    pub y: usize,
    /// Offending density
    pub density: f32,
}

/// Density and momentum `Σ f_i e_i` of one cell
#[inline]
#[must_use]
pub fn cell_density_momentum(f: &Populations) -> (f32, Vec2) {
    let mut rho = 0.0;
    let mut momentum = Vec2::zeros();
    for (fi, e) in f.iter().zip(E.iter()) {
        rho += fi;
        momentum.x += fi * e[0] as f32;
        momentum.y += fi * e[1] as f32;
    }
    (rho, momentum)
}

/// Fill `density` and `velocity` from `populations`
///
/// Every cell is written; an unstable cell gets its raw density and a zero
/// velocity.
///
/// # Arguments
///
/// * `populations` - Post-streaming populations
/// * `density` - Output density field
/// * `velocity` - Output velocity field
/// * `lattice_speed` - `c = dx / dt`
///
/// # Errors
///
/// Returns the lowest-indexed [`UnstableCell`] if any cell has zero or
/// non-finite density, or a density small enough to give a non-finite
/// velocity.
pub fn compute_moments_cpu(
    populations: &PopulationGrid,
    density: &mut ScalarField,
    velocity: &mut VelocityField,
    lattice_speed: f32,
) -> Result<(), UnstableCell> {
    debug_assert!(populations.same_shape(density) && populations.same_shape(velocity));
    let width = populations.width;

    let unstable = density
        .as_mut_slice()
        .par_chunks_mut(width)
        .zip(velocity.as_mut_slice().par_chunks_mut(width))
        .zip(populations.as_slice().par_chunks(width))
        .enumerate()
        .filter_map(|(y, ((rho_row, u_row), f_row))| {
            let mut first_bad = None;
            for (x, f) in f_row.iter().enumerate() {
                let (rho, momentum) = cell_density_momentum(f);
                rho_row[x] = rho;

                let u = momentum * (lattice_speed / rho);
                if rho == 0.0 || !rho.is_finite() || !u.x.is_finite() || !u.y.is_finite() {
                    u_row[x] = Vec2::zeros();
                    first_bad.get_or_insert(UnstableCell { x, y, density: rho });
                    continue;
                }

                u_row[x] = u;
            }
            first_bad
        })
        .min_by_key(|cell| (cell.y, cell.x));

    match unstable {
        Some(cell) => Err(cell),
        None => Ok(()),
    }
}
