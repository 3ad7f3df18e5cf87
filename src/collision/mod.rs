//! Container geometry and contact handling against the glass and the ground arc.

pub mod boundary;
pub mod ground;

pub use boundary::{GlobeBoundary, WallContact};
pub use ground::{correct_penetration, pin_to_ground, GroundContact};
