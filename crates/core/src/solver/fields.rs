//! Field data structures for the lattice solver
//!
//! Every per-cell quantity (density, velocity, the nine populations) is stored
//! as a flat row-major `Vec<T>` so that rows can be handed out to Rayon workers
//! as disjoint slices.

use crate::core_types::{Populations, Vec2};

/// Field data container
///
/// Stores 2D field data as a flat `Vec<T>` in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData<T = f32> {
    /// Field values in row-major order (y * width + x)
    pub data: Vec<T>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

/// Scalar field (density)
pub type ScalarField = FieldData<f32>;

/// Velocity field
pub type VelocityField = FieldData<Vec2>;

/// Population grid: nine populations per cell
pub type PopulationGrid = FieldData<Populations>;

impl<T: Copy + Default> FieldData<T> {
    /// Create a new field with given dimensions, initialized to `T::default()`
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, T::default())
    }
}

impl<T: Copy> FieldData<T> {
    /// Create a new field with given dimensions, initialized to a value
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `value` - Initial value for all cells
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Number of cells in the field
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field holds no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Row-major index of `(x, y)`
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[self.index(x, y)]
    }

    /// Get mutable reference to the value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        *self.get_mut(x, y) = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Whether `other` covers the same grid
    #[must_use]
    pub fn same_shape<U>(&self, other: &FieldData<U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl PopulationGrid {
    /// Sum of the nine populations at `(x, y)`
    #[must_use]
    pub fn cell_sum(&self, x: usize, y: usize) -> f32 {
        self.get(x, y).iter().sum()
    }
}
