//! Snow Globe – a frame-driven particle simulation of a contained fluid.
//!
//! Particles fall under gravity, swirl when the globe is shaken, bounce off
//! the circular glass with lossy collisions, and come to rest on the curved
//! floor. The crate is renderer-agnostic: a driver calls `step()` once per
//! display refresh and hands positions to a [`RenderSink`].

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod motion;
pub mod render;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::{GlobeBoundary, GroundContact, WallContact};
pub use config::GlobeConfig;
pub use crate::core::{Particle, ParticleStore, RenderHandle};
pub use dynamics::{
    forces::{ForceGenerator, ForceRegistry, GravityForce, JitterForce, SwirlForce},
    impulse::ImpulseOutcome,
    integrator::{Integrator, StepTally},
    rest::RestState,
};
pub use error::ConfigError;
pub use motion::{ManualMotion, MotionSample, MotionSender, MotionSource, NoMotion};
pub use render::{ParticleSprite, RenderFrame, RenderSink};
pub use utils::profiling::StepStats;
pub use world::GlobeWorld;

use log::{info, warn};

/// High-level convenience wrapper that owns a [`GlobeWorld`] and its motion source.
pub struct SnowGlobe {
    world: GlobeWorld,
    motion: Option<Box<dyn MotionSource>>,
}

impl SnowGlobe {
    /// Creates a globe with particles piled at rest on the floor.
    pub fn create(config: GlobeConfig) -> error::Result<Self> {
        Ok(Self {
            world: GlobeWorld::new(config)?,
            motion: None,
        })
    }

    /// Creates a globe with reproducible randomness.
    pub fn with_seed(config: GlobeConfig, seed: u64) -> error::Result<Self> {
        Ok(Self {
            world: GlobeWorld::with_seed(config, seed)?,
            motion: None,
        })
    }

    /// Starts `source` feeding this globe, replacing any previous source.
    ///
    /// Returns `false` when the source is unsupported or refused to start;
    /// the globe keeps running without motion input either way.
    pub fn attach_motion<S: MotionSource + 'static>(&mut self, source: S) -> bool {
        self.detach_motion();
        if self.world.is_disposed() {
            return false;
        }

        let mut source = source;
        if !source.is_supported() {
            info!("Motion not supported by source '{}'", source.name());
            return false;
        }
        if !source.start(self.world.motion_sender()) {
            warn!("Motion source '{}' refused to start", source.name());
            return false;
        }

        info!("Motion detection started ({})", source.name());
        self.motion = Some(Box::new(source));
        true
    }

    /// Stops and drops the current motion source, if any.
    pub fn detach_motion(&mut self) {
        if let Some(mut source) = self.motion.take() {
            source.stop();
            info!("Motion detection stopped ({})", source.name());
        }
    }

    pub fn has_motion(&self) -> bool {
        self.motion.is_some()
    }

    /// Most recent sample reported by the attached source.
    pub fn latest_motion(&self) -> Option<MotionSample> {
        self.motion
            .as_ref()
            .and_then(|source| source.latest())
            .or_else(|| self.world.last_motion())
    }

    /// Advances one frame. Returns `None` once the globe is disposed.
    pub fn step(&mut self) -> Option<StepStats> {
        if self.world.is_disposed() {
            return None;
        }
        Some(self.world.step())
    }

    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        self.world.render(sink);
    }

    /// Stops stepping and detaches motion input. Idempotent.
    pub fn dispose(&mut self) {
        self.detach_motion();
        self.world.dispose();
    }

    pub fn is_running(&self) -> bool {
        !self.world.is_disposed()
    }

    pub fn world(&self) -> &GlobeWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut GlobeWorld {
        &mut self.world
    }
}

impl Drop for SnowGlobe {
    fn drop(&mut self) {
        self.detach_motion();
    }
}
