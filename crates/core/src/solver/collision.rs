//! BGK collision
//!
//! Single-relaxation-time collision toward the local equilibrium:
//!
//! ```text
//! f_eq_i = ρ w_i (1 + 3 (e_i·u)/c + 9/2 (e_i·u)²/c² - 3/2 (u·u)/c²)
//! f_i   ← f_i - (f_i - f_eq_i) / τ
//! ```
//!
//! Since `Σ w_i = 1` and the odd moments of the lattice vanish, `Σ f_eq_i = ρ`,
//! so the update preserves each cell's density.

use super::fields::{PopulationGrid, ScalarField, VelocityField};
use crate::core_types::d2q9::{E, Q, W};
use crate::core_types::{Populations, Vec2};
use rayon::prelude::*;

/// Method constants for the collision pass
#[derive(Debug, Clone, Copy)]
pub struct CollisionParams {
    /// Lattice speed `c = dx / dt`
    pub lattice_speed: f32,
    /// Relaxation time τ
    pub tau: f32,
}

/// Equilibrium populations for a cell with the given density and velocity
///
/// # Arguments
///
/// * `density` - Cell density ρ
/// * `velocity` - Cell velocity u
/// * `lattice_speed` - `c = dx / dt`
#[inline]
#[must_use]
pub fn equilibrium(density: f32, velocity: Vec2, lattice_speed: f32) -> Populations {
    let inv_c = 1.0 / lattice_speed;
    let inv_c2 = inv_c * inv_c;
    let uu = velocity.norm_squared();

    let mut feq = [0.0; Q];
    for i in 0..Q {
        let eu = velocity.x * E[i][0] as f32 + velocity.y * E[i][1] as f32;
        feq[i] = density
            * W[i]
            * (1.0 + 3.0 * eu * inv_c + 4.5 * eu * eu * inv_c2 - 1.5 * uu * inv_c2);
    }
    feq
}

/// Relax every cell of `populations` toward equilibrium, in place
///
/// # Arguments
///
/// * `populations` - Post-streaming populations, overwritten with post-collision values
/// * `density` - Densities computed from `populations`
/// * `velocity` - Velocities computed from `populations`
/// * `params` - Method constants
pub fn collide_cpu(
    populations: &mut PopulationGrid,
    density: &ScalarField,
    velocity: &VelocityField,
    params: CollisionParams,
) {
    debug_assert!(populations.same_shape(density) && populations.same_shape(velocity));
    let width = populations.width;
    let omega = 1.0 / params.tau;

    populations
        .as_mut_slice()
        .par_chunks_mut(width)
        .zip(density.as_slice().par_chunks(width))
        .zip(velocity.as_slice().par_chunks(width))
        .for_each(|((f_row, rho_row), u_row)| {
            for ((f, &rho), &u) in f_row.iter_mut().zip(rho_row).zip(u_row) {
                let feq = equilibrium(rho, u, params.lattice_speed);
                for i in 0..Q {
                    f[i] -= omega * (f[i] - feq[i]);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::moments::compute_moments_cpu;
    use approx::assert_relative_eq;

    fn params(tau: f32) -> CollisionParams {
        CollisionParams {
            lattice_speed: 1.0,
            tau,
        }
    }

    /// Deterministic, non-equilibrium populations
    fn skewed_grid(width: usize, height: usize) -> PopulationGrid {
        let mut grid = PopulationGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let cell = grid.get_mut(x, y);
                for i in 0..Q {
                    let phase = (x * 7 + y * 13 + i * 3) % 11;
                    cell[i] = W[i] * (0.9 + 0.02 * phase as f32);
                }
            }
        }
        grid
    }

    #[test]
    fn test_zero_velocity_equilibrium_is_weighted_density() {
        let feq = equilibrium(1.7, Vec2::zeros(), 2.0);
        for i in 0..Q {
            assert_eq!(feq[i], 1.7 * W[i]);
        }
    }

    #[test]
    fn test_equilibrium_preserves_density_and_momentum() {
        let u = Vec2::new(0.05, -0.03);
        let feq = equilibrium(1.2, u, 1.0);

        let rho: f32 = feq.iter().sum();
        assert_relative_eq!(rho, 1.2, max_relative = 1e-6);

        let mx: f32 = feq.iter().zip(E.iter()).map(|(f, e)| f * e[0] as f32).sum();
        let my: f32 = feq.iter().zip(E.iter()).map(|(f, e)| f * e[1] as f32).sum();
        assert_relative_eq!(mx, 1.2 * u.x, max_relative = 1e-5);
        assert_relative_eq!(my, 1.2 * u.y, max_relative = 1e-5);
    }

    #[test]
    fn test_collision_preserves_cell_density() {
        let (width, height) = (9, 7);
        let mut grid = skewed_grid(width, height);
        let mut density = ScalarField::new(width, height);
        let mut velocity = VelocityField::with_value(width, height, Vec2::zeros());
        compute_moments_cpu(&grid, &mut density, &mut velocity, 1.0).unwrap();

        collide_cpu(&mut grid, &density, &velocity, params(0.6));

        for y in 0..height {
            for x in 0..width {
                assert_relative_eq!(grid.cell_sum(x, y), density.get(x, y), max_relative = 1e-5);
            }
        }
    }

    #[test]
    fn test_unit_tau_jumps_to_equilibrium() {
        let (width, height) = (3, 3);
        let mut grid = skewed_grid(width, height);
        let mut density = ScalarField::new(width, height);
        let mut velocity = VelocityField::with_value(width, height, Vec2::zeros());
        compute_moments_cpu(&grid, &mut density, &mut velocity, 1.0).unwrap();

        collide_cpu(&mut grid, &density, &velocity, params(1.0));

        let feq = equilibrium(density.get(1, 2), velocity.get(1, 2), 1.0);
        for i in 0..Q {
            assert_relative_eq!(grid.get(1, 2)[i], feq[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_equilibrium_is_fixed_point() {
        let cell = equilibrium(1.0, Vec2::zeros(), 1.0);
        let mut grid = PopulationGrid::with_value(4, 4, cell);
        let density = ScalarField::with_value(4, 4, 1.0);
        let velocity = VelocityField::with_value(4, 4, Vec2::zeros());

        collide_cpu(&mut grid, &density, &velocity, params(0.7));

        for f in &grid.data {
            for i in 0..Q {
                assert_relative_eq!(f[i], W[i], epsilon = 1e-6);
            }
        }
    }
}
