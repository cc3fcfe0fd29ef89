//! D2Q9 lattice constants
//!
//! Nine discrete velocities on a 2D square lattice. The index order is fixed
//! for the lifetime of the process and every population array uses it:
//!
//! ```text
//!   |-----------|
//!   | 6 | 2 | 5 |
//!   |-----------|
//!   | 3 | 0 | 1 |
//!   |-----------|
//!   | 7 | 4 | 8 |
//!   |-----------|
//! ```
//!
//! Row index `y` grows downwards in the diagram, so direction 2 has offset
//! `(0, -1)` and direction 4 has offset `(0, 1)`.

/// Number of discrete velocities per cell
pub const Q: usize = 9;

/// Populations of a single cell, indexed by direction
pub type Populations = [f32; Q];

/// Discrete velocity offsets `e_i` as `[dx, dy]`
pub const E: [[i32; 2]; Q] = [
    [0, 0],   // 0: rest
    [1, 0],   // 1: east
    [0, -1],  // 2: north
    [-1, 0],  // 3: west
    [0, 1],   // 4: south
    [1, -1],  // 5: north-east
    [-1, -1], // 6: north-west
    [-1, 1],  // 7: south-west
    [1, 1],   // 8: south-east
];

/// Common denominator of the lattice weights
pub const WEIGHT_DENOMINATOR: u32 = 36;

/// Lattice weights as integer numerators over [`WEIGHT_DENOMINATOR`]
///
/// Kept as integers so normalisation can be checked exactly.
pub const WEIGHT_NUMERATORS: [u32; Q] = [16, 4, 4, 4, 4, 1, 1, 1, 1];

/// Lattice weights `w_i`
pub const W: [f32; Q] = [
    16.0 / 36.0, // 0: rest (4/9)
    4.0 / 36.0,  // 1-4: axis-aligned (1/9)
    4.0 / 36.0,
    4.0 / 36.0,
    4.0 / 36.0,
    1.0 / 36.0, // 5-8: diagonal (1/36)
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// Cell reached from `(x, y)` by moving along direction `i` on a torus.
///
/// Uses Euclidean remainder so negative offsets wrap to the opposite edge.
#[inline]
pub fn neighbor(x: usize, y: usize, i: usize, width: usize, height: usize) -> (usize, usize) {
    let [ex, ey] = E[i];
    (wrap(x, ex, width), wrap(y, ey, height))
}

/// Cell whose direction-`i` population lands on `(x, y)` after streaming.
///
/// Inverse of [`neighbor`].
#[inline]
pub fn upstream(x: usize, y: usize, i: usize, width: usize, height: usize) -> (usize, usize) {
    let [ex, ey] = E[i];
    (wrap(x, -ex, width), wrap(y, -ey, height))
}

#[inline(always)]
fn wrap(coord: usize, offset: i32, extent: usize) -> usize {
    (coord as i64 + i64::from(offset)).rem_euclid(extent as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_normalized() {
        let numerator_sum: u32 = WEIGHT_NUMERATORS.iter().sum();
        assert_eq!(numerator_sum, WEIGHT_DENOMINATOR);

        let float_sum: f32 = W.iter().sum();
        assert!((float_sum - 1.0).abs() <= f32::EPSILON);
    }

    #[test]
    fn test_weights_match_numerators() {
        for i in 0..Q {
            let expected = WEIGHT_NUMERATORS[i] as f32 / WEIGHT_DENOMINATOR as f32;
            assert_eq!(W[i], expected, "weight {i}");
        }
        assert_eq!(W[0], 4.0 / 9.0);
        assert_eq!(W[1], 1.0 / 9.0);
    }

    #[test]
    fn test_velocity_set_symmetric() {
        // Every non-rest direction has its opposite in the set
        for e in &E[1..] {
            assert!(E.contains(&[-e[0], -e[1]]));
        }
        let sum = E.iter().fold([0, 0], |acc, e| [acc[0] + e[0], acc[1] + e[1]]);
        assert_eq!(sum, [0, 0]);
    }

    #[test]
    fn test_neighbor_wraps_negative_offsets() {
        assert_eq!(neighbor(0, 0, 3, 4, 5), (3, 0));
        assert_eq!(neighbor(0, 0, 2, 4, 5), (0, 4));
        assert_eq!(neighbor(0, 0, 6, 4, 5), (3, 4));
        assert_eq!(neighbor(3, 4, 8, 4, 5), (0, 0));
        assert_eq!(neighbor(2, 2, 0, 4, 5), (2, 2));
    }

    #[test]
    fn test_upstream_inverts_neighbor() {
        let (width, height) = (7, 3);
        for y in 0..height {
            for x in 0..width {
                for i in 0..Q {
                    let (nx, ny) = neighbor(x, y, i, width, height);
                    assert_eq!(upstream(nx, ny, i, width, height), (x, y));
                }
            }
        }
    }
}
