//! Hand-off of particle state to whatever draws the globe.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::{particle::RenderHandle, store::ParticleStore};

/// Receives every particle once per frame.
///
/// The simulation does not care how, or whether, particles are drawn.
pub trait RenderSink {
    fn begin_frame(&mut self, _particle_count: usize) {}

    fn draw(&mut self, handle: RenderHandle, position: Vec2, size: f32, opacity: f32);

    fn end_frame(&mut self) {}
}

/// GPU-friendly per-particle draw data.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSprite {
    pub position: Vec2,
    pub size: f32,
    pub opacity: f32,
}

/// Snapshot of every particle laid out by render handle, ready for upload.
#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub sprites: Vec<ParticleSprite>,
}

impl RenderFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current particle state into the sprite buffer.
    pub fn sync(&mut self, particles: &ParticleStore) {
        self.begin_frame(particles.len());
        for particle in particles {
            self.draw(
                particle.render_handle,
                particle.position,
                particle.size,
                particle.opacity,
            );
        }
        self.end_frame();
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}

impl RenderSink for RenderFrame {
    fn begin_frame(&mut self, particle_count: usize) {
        self.sprites.clear();
        self.sprites.resize(particle_count, ParticleSprite::default());
    }

    fn draw(&mut self, handle: RenderHandle, position: Vec2, size: f32, opacity: f32) {
        let index = handle.index();
        if index >= self.sprites.len() {
            self.sprites.resize(index + 1, ParticleSprite::default());
        }
        self.sprites[index] = ParticleSprite {
            position,
            size,
            opacity,
        };
    }
}
