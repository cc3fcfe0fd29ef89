//! Initial conditions
//!
//! Scenarios write a full set of populations into the buffer the solver reads
//! first. All of them produce strictly positive populations so the first
//! moment pass never sees an empty cell.

use crate::core_types::d2q9::{Q, W};
use crate::core_types::Vec2;
use crate::solver::{equilibrium, LatticeError, PopulationGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Population assigned to every direction in the background of [`Scenario::SquareJet`]
const JET_BACKGROUND: f32 = 1.0 / 9.0;

/// Eastward population inside the jet square
const JET_EAST: f32 = 2.0 / 9.0;

/// Initial condition applied before the first step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scenario {
    /// Fluid at rest with uniform density
    Uniform {
        /// Cell density
        density: f32,
    },
    /// Uniform density moving with a uniform velocity
    UniformFlow {
        /// Cell density
        density: f32,
        /// Flow velocity in lattice units scaled by `c`
        velocity: Vec2,
    },
    /// Every population at 1/9, with a square of doubled eastward population
    ///
    /// The square spans the open interval `(W/2, 3W/4) × (H/2, 3H/4)`.
    SquareJet,
    /// Rest equilibrium with seeded uniform noise on every population
    RandomPerturbation {
        /// Mean cell density
        density: f32,
        /// Relative noise amplitude, in `[0, 1)`
        amplitude: f32,
        /// RNG seed, same seed gives the same field
        seed: u64,
    },
}

impl Scenario {
    /// Check the scenario's parameters
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidConfig`] for a non-positive or
    /// non-finite density, a non-finite velocity, or an amplitude outside
    /// `[0, 1)`.
    pub fn validate(&self) -> Result<(), LatticeError> {
        match self {
            Scenario::Uniform { density } => check_density(*density),
            Scenario::UniformFlow { density, velocity } => {
                check_density(*density)?;
                if velocity.iter().all(|v| v.is_finite()) {
                    Ok(())
                } else {
                    Err(LatticeError::invalid(
                        "velocity",
                        format!("must be finite, got ({}, {})", velocity.x, velocity.y),
                    ))
                }
            }
            Scenario::SquareJet => Ok(()),
            Scenario::RandomPerturbation {
                density, amplitude, ..
            } => {
                check_density(*density)?;
                if (0.0..1.0).contains(amplitude) {
                    Ok(())
                } else {
                    Err(LatticeError::invalid(
                        "amplitude",
                        format!("must lie in [0, 1), got {amplitude}"),
                    ))
                }
            }
        }
    }

    /// Overwrite every cell of `grid` with this initial condition
    ///
    /// # Arguments
    ///
    /// * `grid` - Populations to seed
    /// * `lattice_speed` - `c = dx / dt`, used for moving equilibria
    pub fn apply(&self, grid: &mut PopulationGrid, lattice_speed: f32) {
        match self {
            Scenario::Uniform { density } => {
                grid.fill(equilibrium(*density, Vec2::zeros(), lattice_speed));
            }
            Scenario::UniformFlow { density, velocity } => {
                grid.fill(equilibrium(*density, *velocity, lattice_speed));
            }
            Scenario::SquareJet => seed_square_jet(grid),
            Scenario::RandomPerturbation {
                density,
                amplitude,
                seed,
            } => seed_random(grid, *density, *amplitude, *seed),
        }
    }

    /// Short name for reports
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Uniform { .. } => "uniform",
            Scenario::UniformFlow { .. } => "uniform-flow",
            Scenario::SquareJet => "square-jet",
            Scenario::RandomPerturbation { .. } => "random",
        }
    }
}

fn check_density(density: f32) -> Result<(), LatticeError> {
    if density.is_finite() && density > 0.0 {
        Ok(())
    } else {
        Err(LatticeError::invalid(
            "density",
            format!("must be positive and finite, got {density}"),
        ))
    }
}

fn seed_square_jet(grid: &mut PopulationGrid) {
    let (width, height) = (grid.width, grid.height);
    let (x_lo, x_hi) = (width / 2, 3 * width / 4);
    let (y_lo, y_hi) = (height / 2, 3 * height / 4);

    grid.fill([JET_BACKGROUND; Q]);
    for y in (y_lo + 1)..y_hi {
        for x in (x_lo + 1)..x_hi {
            grid.get_mut(x, y)[1] = JET_EAST;
        }
    }
}

fn seed_random(grid: &mut PopulationGrid, density: f32, amplitude: f32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    // Sequential fill keeps the field independent of thread count
    for cell in grid.as_mut_slice() {
        for i in 0..Q {
            let noise = if amplitude > 0.0 {
                rng.random_range(-amplitude..amplitude)
            } else {
                0.0
            };
            cell[i] = density * W[i] * (1.0 + noise);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_is_rest_equilibrium() {
        let mut grid = PopulationGrid::new(4, 4);
        Scenario::Uniform { density: 2.0 }.apply(&mut grid, 1.0);
        for cell in &grid.data {
            for i in 0..Q {
                assert_eq!(cell[i], 2.0 * W[i]);
            }
        }
    }

    #[test]
    fn test_square_jet_matches_layout() {
        let mut grid = PopulationGrid::new(100, 100);
        Scenario::SquareJet.apply(&mut grid, 1.0);

        assert_eq!(grid.get(51, 51)[1], JET_EAST);
        assert_eq!(grid.get(74, 74)[1], JET_EAST);
        assert_eq!(grid.get(50, 60)[1], JET_BACKGROUND);
        assert_eq!(grid.get(75, 60)[1], JET_BACKGROUND);
        assert_eq!(grid.get(60, 60)[3], JET_BACKGROUND);

        let jet_cells = grid
            .data
            .iter()
            .filter(|cell| cell[1] == JET_EAST)
            .count();
        assert_eq!(jet_cells, 24 * 24);
    }

    #[test]
    fn test_random_is_reproducible_and_positive() {
        let scenario = Scenario::RandomPerturbation {
            density: 1.0,
            amplitude: 0.2,
            seed: 7,
        };
        let mut a = PopulationGrid::new(8, 8);
        let mut b = PopulationGrid::new(8, 8);
        scenario.apply(&mut a, 1.0);
        scenario.apply(&mut b, 1.0);

        assert_eq!(a, b);
        assert!(a.data.iter().all(|cell| cell.iter().all(|&f| f > 0.0)));
        let mean: f32 = (0..8).map(|x| a.cell_sum(x, 3)).sum::<f32>() / 8.0;
        assert_relative_eq!(mean, 1.0, epsilon = 0.2);
    }

    #[test]
    fn test_validation() {
        assert!(Scenario::Uniform { density: 1.0 }.validate().is_ok());
        assert!(Scenario::Uniform { density: 0.0 }.validate().is_err());
        assert!(Scenario::RandomPerturbation {
            density: 1.0,
            amplitude: 1.0,
            seed: 0
        }
        .validate()
        .is_err());
        assert!(Scenario::UniformFlow {
            density: 1.0,
            velocity: Vec2::new(f32::NAN, 0.0)
        }
        .validate()
        .is_err());
    }
}
