use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque link to whatever the renderer draws for a particle.
///
/// The simulation never looks inside; by default it is the particle's index
/// into a caller-owned render buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RenderHandle(pub u32);

impl RenderHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single snow particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    /// Units per frame.
    pub velocity: Vec2,
    pub size: f32,
    /// Only scales gravity.
    pub mass: f32,
    pub opacity: f32,
    pub is_resting: bool,
    /// Fixed offset in `[0, 2π)` desynchronizing the swirl response.
    pub swirl_phase: f32,
    pub render_handle: RenderHandle,
}

impl Particle {
    pub fn new(position: Vec2, size: f32, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            mass,
            opacity: 1.0,
            is_resting: false,
            swirl_phase: 0.0,
            render_handle: RenderHandle(0),
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Marks the particle active. Returns `true` if it was resting.
    pub fn wake(&mut self) -> bool {
        std::mem::replace(&mut self.is_resting, false)
    }

    /// Pins the particle at `ground_y` with zero velocity.
    pub fn settle_at(&mut self, ground_y: f32) {
        self.velocity = Vec2::ZERO;
        self.position.y = ground_y;
        self.is_resting = true;
    }
}
