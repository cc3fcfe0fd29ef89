//! D2Q9 lattice solver
//!
//! Owns the two population buffers and the derived density and velocity
//! fields. Each [`LatticeSolver::step`] runs three Rayon passes in a fixed
//! order, each one finishing before the next starts:
//!
//! 1. streaming (read buffer → write buffer)
//! 2. moments (write buffer → density, velocity)
//! 3. collision (write buffer, in place)
//!
//! and then flips which buffer is read on the next step.

use super::collision::{collide_cpu, CollisionParams};
use super::config::LatticeConfig;
use super::error::LatticeError;
use super::fields::{PopulationGrid, ScalarField, VelocityField};
use super::moments::compute_moments_cpu;
use super::streaming::stream_cpu;
use crate::core_types::Vec2;
use crate::scenario::Scenario;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Lifecycle of the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Constructed, populations still zero
    Uninitialized,
    /// Populations seeded, ready to step
    Ready,
}

/// D2Q9 Lattice Boltzmann solver on a periodic domain
///
/// Populations live in a ping-pong pair selected by `write_index`. Outside of
/// [`step`](Self::step), the buffer at the other index holds the most recent
/// result and is the one the next step reads.
pub struct LatticeSolver {
    config: LatticeConfig,
    populations: [PopulationGrid; 2],
    write_index: usize,
    density: ScalarField,
    velocity: VelocityField,
    lattice_speed: f32,
    viscosity: f32,
    state: SolverState,
    steps: u64,
}

/// Split the buffer pair into `(read, write)` for one step
fn split_buffers(
    buffers: &mut [PopulationGrid; 2],
    write_index: usize,
) -> (&PopulationGrid, &mut PopulationGrid) {
    let (first, second) = buffers.split_at_mut(1);
    if write_index == 0 {
        (&second[0], &mut first[0])
    } else {
        (&first[0], &mut second[0])
    }
}

impl LatticeSolver {
    /// Create a new solver with zeroed populations
    ///
    /// # Arguments
    ///
    /// * `config` - Grid size, method constants and boundary policy
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: LatticeConfig) -> Result<Self, LatticeError> {
        config.validate()?;

        let (width, height) = (config.width, config.height);
        let lattice_speed = config.lattice_speed();
        let viscosity = config.viscosity();

        info!(
            "Lattice solver initialized: {}x{} grid, dx={}, dt={}, tau={}, viscosity={:.5}, boundary={:?}",
            width, height, config.dx, config.dt, config.tau, viscosity, config.boundary
        );

        Ok(Self {
            populations: [
                PopulationGrid::new(width, height),
                PopulationGrid::new(width, height),
            ],
            write_index: 0,
            density: ScalarField::new(width, height),
            velocity: VelocityField::with_value(width, height, Vec2::zeros()),
            lattice_speed,
            viscosity,
            state: SolverState::Uninitialized,
            steps: 0,
            config,
        })
    }

    /// Convenience constructor from raw parameters
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidConfig`] for out-of-range parameters.
    pub fn with_parameters(
        width: usize,
        height: usize,
        dx: f32,
        dt: f32,
        tau: f32,
    ) -> Result<Self, LatticeError> {
        Self::new(LatticeConfig::new(width, height, dx, dt, tau))
    }

    fn read_index(&self) -> usize {
        1 - self.write_index
    }

    /// Advance the simulation by one timestep
    ///
    /// # Errors
    ///
    /// - [`LatticeError::NotSeeded`] if no populations were seeded yet.
    /// - [`LatticeError::NumericalInstability`] if a cell's density is zero or
    ///   non-finite after streaming, or too small to give a finite velocity.
    ///   The buffers are not flipped, so the caller should abort the run.
    ///   [`density`](Self::density) and [`velocity`](Self::velocity) then hold
    ///   the moments of the failed streaming result and no longer match
    ///   [`populations`](Self::populations).
    pub fn step(&mut self) -> Result<(), LatticeError> {
        if self.state == SolverState::Uninitialized {
            return Err(LatticeError::NotSeeded);
        }

        let started = Instant::now();
        let (read, write) = split_buffers(&mut self.populations, self.write_index);

        stream_cpu(read, write, self.config.boundary);

        if let Err(cell) =
            compute_moments_cpu(write, &mut self.density, &mut self.velocity, self.lattice_speed)
        {
            let err = LatticeError::NumericalInstability {
                x: cell.x,
                y: cell.y,
                density: cell.density,
                step: self.steps,
            };
            warn!("{}", err);
            return Err(err);
        }

        collide_cpu(
            write,
            &self.density,
            &self.velocity,
            CollisionParams {
                lattice_speed: self.lattice_speed,
                tau: self.config.tau,
            },
        );

        self.write_index = self.read_index();
        self.steps += 1;

        debug!(
            "Lattice step {} complete in {:.3}ms, mass={:.6}",
            self.steps,
            started.elapsed().as_secs_f64() * 1000.0,
            self.density
                .as_slice()
                .iter()
                .map(|&rho| f64::from(rho))
                .sum::<f64>()
        );
        Ok(())
    }

    /// Advance by `count` steps, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`step`](Self::step).
    pub fn run(&mut self, count: u64) -> Result<(), LatticeError> {
        for _ in 0..count {
            self.step()?;
        }
        Ok(())
    }

    /// Populations read by the next step, for seeding initial conditions
    ///
    /// Marks the solver ready. Mutating this buffer between steps replaces the
    /// current state of the flow.
    pub fn distributions_mut(&mut self) -> &mut PopulationGrid {
        self.state = SolverState::Ready;
        let read = self.read_index();
        &mut self.populations[read]
    }

    /// Seed the populations from a scenario
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidConfig`] if the scenario's parameters are
    /// out of range. The populations are left untouched in that case.
    pub fn seed(&mut self, scenario: &Scenario) -> Result<(), LatticeError> {
        scenario.validate()?;
        let lattice_speed = self.lattice_speed;
        scenario.apply(self.distributions_mut(), lattice_speed);
        info!("Seeded populations with {:?}", scenario);
        Ok(())
    }

    /// Compute density and velocity from the seeded populations without stepping
    ///
    /// Makes [`density`](Self::density) and [`velocity`](Self::velocity)
    /// meaningful before the first step.
    ///
    /// # Errors
    ///
    /// - [`LatticeError::NotSeeded`] if no populations were seeded yet.
    /// - [`LatticeError::NumericalInstability`] for a zero or non-finite density.
    pub fn compute_moments_from_seed(&mut self) -> Result<(), LatticeError> {
        if self.state == SolverState::Uninitialized {
            return Err(LatticeError::NotSeeded);
        }
        let read = &self.populations[self.read_index()];
        compute_moments_cpu(read, &mut self.density, &mut self.velocity, self.lattice_speed)
            .map_err(|cell| LatticeError::NumericalInstability {
                x: cell.x,
                y: cell.y,
                density: cell.density,
                step: self.steps,
            })
    }

    /// Density field from the most recent moment computation
    ///
    /// After a failed [`step`](Self::step) this reflects the rejected streaming
    /// result, not [`populations`](Self::populations).
    pub fn density(&self) -> &ScalarField {
        &self.density
    }

    /// Velocity field from the most recent moment computation
    pub fn velocity(&self) -> &VelocityField {
        &self.velocity
    }

    /// Most recent post-collision populations (or the seed before the first step)
    pub fn populations(&self) -> &PopulationGrid {
        &self.populations[self.read_index()]
    }

    /// Kinematic viscosity `v = (2τ - 1) / 6 · dx² / dt`
    pub fn viscosity(&self) -> f32 {
        self.viscosity
    }

    /// Lattice speed `c = dx / dt`
    pub fn lattice_speed(&self) -> f32 {
        self.lattice_speed
    }

    /// Grid dimensions as `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.config.width, self.config.height)
    }

    /// Configuration the solver was built with
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Number of completed steps
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }
}
