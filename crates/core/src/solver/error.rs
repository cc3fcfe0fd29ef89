//! Errors reported by the lattice solver

/// Errors that can occur while configuring, seeding, or stepping the solver
#[derive(Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// A construction or scenario parameter is out of range
    InvalidConfig {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What is wrong with it
        message: String,
    },
    /// A cell's density collapsed to zero or became non-finite
    NumericalInstability {
        /// Cell column
        x: usize,
        /// Cell row
        y: usize,
        /// Density found at the cell
        density: f32,
        /// Index of the step that failed (0 = first step)
        step: u64,
    },
    /// A step or moment computation was requested before any populations were seeded
    NotSeeded,
}

impl LatticeError {
    /// Create an invalid-configuration error
    pub(crate) fn invalid(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LatticeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LatticeError::InvalidConfig { parameter, message } => {
                write!(f, "Invalid parameter '{parameter}': {message}")
            }
            LatticeError::NumericalInstability {
                x,
                y,
                density,
                step,
            } => write!(
                f,
                "Numerical instability at step {step}: cell ({x}, {y}) has density {density}"
            ),
            LatticeError::NotSeeded => {
                write!(f, "Populations must be seeded before the solver is stepped")
            }
        }
    }
}

impl std::error::Error for LatticeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LatticeError::invalid("tau", "must be greater than 0.5");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'tau': must be greater than 0.5"
        );

        let err = LatticeError::NumericalInstability {
            x: 3,
            y: 7,
            density: 0.0,
            step: 12,
        };
        assert_eq!(
            err.to_string(),
            "Numerical instability at step 12: cell (3, 7) has density 0"
        );
    }
}
