//! Core types and lattice constants

pub mod d2q9;
pub mod vec2;

pub use d2q9::{Populations, E, Q, W};
pub use vec2::Vec2;
