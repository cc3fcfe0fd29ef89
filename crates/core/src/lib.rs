//! Lattice Boltzmann Core Library
//!
//! A D2Q9 Lattice Boltzmann solver for 2D fluid flow on a periodic domain.
//! Each timestep streams the nine directional populations to their
//! neighbours, measures density and velocity, and relaxes the populations
//! toward local equilibrium with the BGK operator.
//!
//! ## Layout
//!
//! - `core_types`: lattice constants (velocity set, weights) and vector types
//! - `solver`: the three passes and the double-buffered [`LatticeSolver`]
//! - `scenario`: initial conditions for seeding the populations
//! - `diagnostics`: field statistics and renderer-facing helpers

// Core types and lattice constants
pub mod core_types;

pub mod diagnostics;
pub mod scenario;
pub mod solver;

// Re-export core types
pub use core_types::{Populations, Vec2, E, Q, W};

// Re-export solver types
pub use diagnostics::{
    kinetic_energy, max_speed, normalize_for_display, total_mass, FieldStats,
};
pub use scenario::Scenario;
pub use solver::{
    BoundaryPolicy, FieldData, LatticeConfig, LatticeError, LatticeSolver, PopulationGrid,
    ScalarField, SolverState, VelocityField,
};
