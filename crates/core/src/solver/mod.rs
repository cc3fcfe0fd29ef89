//! Lattice Boltzmann solver module
//!
//! The per-timestep update of a D2Q9 lattice: streaming, macroscopic moments,
//! BGK collision. Each pass is a free function over flat row-major fields so
//! that it can be tested on its own; [`LatticeSolver`] owns the buffers and
//! sequences the passes.
//!
//! # Example
//!
//! ```rust
//! use lbm_core::solver::{LatticeConfig, LatticeSolver};
//! use lbm_core::Scenario;
//!
//! let mut solver = LatticeSolver::new(LatticeConfig::new(64, 64, 1.0, 1.0, 0.8)).unwrap();
//! solver.seed(&Scenario::Uniform { density: 1.0 }).unwrap();
//! solver.run(10).unwrap();
//! assert!((solver.density().get(32, 32) - 1.0).abs() < 1e-5);
//! ```

#[allow(clippy::module_name_repetitions)]
mod collision;
#[allow(clippy::module_name_repetitions)]
mod config;
#[allow(clippy::module_name_repetitions)]
mod error;
mod fields;
#[allow(clippy::module_name_repetitions)]
mod lattice;
mod moments;
mod streaming;

pub use collision::{collide_cpu, equilibrium, CollisionParams};
pub use config::{BoundaryPolicy, LatticeConfig};
pub use error::LatticeError;
pub use fields::{FieldData, PopulationGrid, ScalarField, VelocityField};
pub use lattice::{LatticeSolver, SolverState};
pub use moments::{cell_density_momentum, compute_moments_cpu, UnstableCell};
pub use streaming::stream_cpu;
