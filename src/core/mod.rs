//! Core particle state owned by a globe.

pub mod particle;
pub mod store;

pub use particle::{Particle, RenderHandle};
pub use store::ParticleStore;
