//! Streaming pass
//!
//! Moves every directional population one lattice link along its direction:
//!
//! ```text
//! write[(x + e_i.x) mod W, (y + e_i.y) mod H][i] = read[x, y][i]
//! ```
//!
//! The neighbour map is a bijection on the torus, so each destination slot has
//! exactly one source. The pass is therefore written as a pull over rows of the
//! destination buffer, which lets Rayon hand every worker a disjoint row with
//! no synchronisation.

use super::config::BoundaryPolicy;
use super::fields::PopulationGrid;
use crate::core_types::d2q9::{upstream, Q};
use rayon::prelude::*;

/// Stream `read` into `write`, fully overwriting `write`
///
/// # Arguments
///
/// * `read` - Post-collision populations from the previous step
/// * `write` - Destination buffer; previous contents are ignored
/// * `boundary` - Boundary treatment
pub fn stream_cpu(read: &PopulationGrid, write: &mut PopulationGrid, boundary: BoundaryPolicy) {
    debug_assert!(read.same_shape(write), "stream buffers differ in shape");

    match boundary {
        BoundaryPolicy::Periodic => stream_periodic(read, write),
    }
}

fn stream_periodic(read: &PopulationGrid, write: &mut PopulationGrid) {
    let (width, height) = (read.width, read.height);
    let src = read.as_slice();

    write
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                for i in 0..Q {
                    let (sx, sy) = upstream(x, y, i, width, height);
                    cell[i] = src[sy * width + sx][i];
                }
            }
        });
}
