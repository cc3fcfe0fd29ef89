//! Solver configuration
//!
//! Grid size, method constants and boundary policy, fixed at construction.

use super::error::LatticeError;
use serde::{Deserialize, Serialize};

/// How populations leaving the domain are treated during streaming
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BoundaryPolicy {
    /// Toroidal wrap: edges connect to the opposite edge
    #[default]
    Periodic,
}

/// Configuration for the lattice solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Lattice spacing
    pub dx: f32,
    /// Timestep
    pub dt: f32,
    /// BGK relaxation time, must exceed 0.5 for stability
    pub tau: f32,
    /// Boundary treatment used by streaming
    pub boundary: BoundaryPolicy,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            dx: 1.0,
            dt: 1.0,
            tau: 1.0,
            boundary: BoundaryPolicy::Periodic,
        }
    }
}

impl LatticeConfig {
    /// Create a periodic configuration
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `dx` - Lattice spacing
    /// * `dt` - Timestep
    /// * `tau` - Relaxation time
    #[must_use]
    pub fn new(width: usize, height: usize, dx: f32, dt: f32, tau: f32) -> Self {
        Self {
            width,
            height,
            dx,
            dt,
            tau,
            boundary: BoundaryPolicy::Periodic,
        }
    }

    /// Check every parameter against the method's requirements
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidConfig`] naming the first parameter that
    /// is zero, non-positive, non-finite, or (for `tau`) not above 0.5.
    pub fn validate(&self) -> Result<(), LatticeError> {
        if self.width == 0 {
            return Err(LatticeError::invalid("width", "must be at least 1 cell"));
        }
        if self.height == 0 {
            return Err(LatticeError::invalid("height", "must be at least 1 cell"));
        }
        if !(self.dx.is_finite() && self.dx > 0.0) {
            return Err(LatticeError::invalid(
                "dx",
                format!("must be positive and finite, got {}", self.dx),
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(LatticeError::invalid(
                "dt",
                format!("must be positive and finite, got {}", self.dt),
            ));
        }
        if !(self.tau.is_finite() && self.tau > 0.5) {
            return Err(LatticeError::invalid(
                "tau",
                format!("must be finite and greater than 0.5, got {}", self.tau),
            ));
        }
        Ok(())
    }

    /// Lattice speed `c = dx / dt`
    #[must_use]
    pub fn lattice_speed(&self) -> f32 {
        self.dx / self.dt
    }

    /// Kinematic viscosity `v = (2τ - 1) / 6 · dx² / dt`
    #[must_use]
    pub fn viscosity(&self) -> f32 {
        (2.0 * self.tau - 1.0) / 6.0 * self.dx * self.dx / self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        let config = LatticeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.boundary, BoundaryPolicy::Periodic);
    }

    #[test]
    fn test_derived_constants() {
        let config = LatticeConfig::new(10, 10, 0.5, 0.25, 0.8);
        assert_relative_eq!(config.lattice_speed(), 2.0);
        // (1.6 - 1) / 6 * 0.25 / 0.25
        assert_relative_eq!(config.viscosity(), 0.1, epsilon = 1e-6);

        let unit = LatticeConfig::new(10, 10, 1.0, 1.0, 1.0);
        assert_relative_eq!(unit.viscosity(), 1.0 / 6.0);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let cases = [
            (LatticeConfig::new(0, 10, 1.0, 1.0, 1.0), "width"),
            (LatticeConfig::new(10, 0, 1.0, 1.0, 1.0), "height"),
            (LatticeConfig::new(10, 10, 0.0, 1.0, 1.0), "dx"),
            (LatticeConfig::new(10, 10, -1.0, 1.0, 1.0), "dx"),
            (LatticeConfig::new(10, 10, 1.0, 0.0, 1.0), "dt"),
            (LatticeConfig::new(10, 10, 1.0, f32::NAN, 1.0), "dt"),
            (LatticeConfig::new(10, 10, 1.0, 1.0, 0.5), "tau"),
            (LatticeConfig::new(10, 10, 1.0, 1.0, 0.2), "tau"),
            (LatticeConfig::new(10, 10, 1.0, 1.0, f32::INFINITY), "tau"),
        ];

        for (config, expected) in cases {
            match config.validate() {
                Err(LatticeError::InvalidConfig { parameter, .. }) => {
                    assert_eq!(parameter, expected, "config {config:?}");
                }
                other => panic!("expected InvalidConfig for {expected}, got {other:?}"),
            }
        }
    }
}
