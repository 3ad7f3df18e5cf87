//! Configuration for a snow globe simulation.
//!
//! All tunables live in [`GlobeConfig`], grouped by the stage of the pipeline
//! that consumes them. The configuration is validated once when a world is
//! created and is immutable afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default number of particles in a globe.
pub const DEFAULT_PARTICLE_COUNT: usize = 200;

/// Default downward acceleration, in units per frame squared.
pub const DEFAULT_GRAVITY: f32 = 0.015;

/// Default globe radius.
pub const DEFAULT_GLOBE_RADIUS: f32 = 130.0;

/// Default globe center in globe-local coordinates.
pub const DEFAULT_GLOBE_CENTER: [f32; 2] = [150.0, 150.0];

/// Swirl energy never exceeds this value.
pub const DEFAULT_MAX_SWIRL_ENERGY: f32 = 10.0;

/// Particles may only rest while swirl energy stays below this value.
pub const DEFAULT_REST_ENERGY_THRESHOLD: f32 = 0.1;

/// Default capacity of the pending motion sample queue.
pub const DEFAULT_MOTION_QUEUE_CAPACITY: usize = 64;

/// Circular container geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeShape {
    pub radius: f32,
    pub center: Vec2,
    /// Height particles are stacked on at creation (lowest point of the globe by default).
    pub ground_level: f32,
    /// Extra clearance kept between a particle's edge and the glass.
    pub wall_margin: f32,
    /// How far above its ground height a particle still counts as grounded.
    pub ground_tolerance: f32,
    /// Resting particles sit this far above the containment arc.
    pub ground_inset: f32,
}

impl Default for GlobeShape {
    fn default() -> Self {
        Self {
            radius: DEFAULT_GLOBE_RADIUS,
            center: Vec2::from_array(DEFAULT_GLOBE_CENTER),
            ground_level: DEFAULT_GLOBE_CENTER[1] + DEFAULT_GLOBE_RADIUS,
            wall_margin: 1.0,
            ground_tolerance: 3.0,
            ground_inset: 2.0,
        }
    }
}

/// Ranges particles are drawn from at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_size: f32,
    pub max_size: f32,
    pub min_mass: f32,
    pub max_mass: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    /// Horizontal spread of the initial pile, as a fraction of the globe diameter scale.
    pub spread: f32,
    /// Maximum vertical jitter of the initial pile at the globe center.
    pub stack_height: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_size: 2.0,
            max_size: 5.0,
            min_mass: 0.5,
            max_mass: 1.0,
            min_opacity: 0.6,
            max_opacity: 1.0,
            spread: 1.6,
            stack_height: 20.0,
        }
    }
}

/// Turbulence driven by accumulated swirl energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwirlConfig {
    pub strength: f32,
    /// Geometric decay applied to swirl energy once per frame.
    pub decay_rate: f32,
    /// Scale from swirl factor to per-frame velocity change.
    pub response: f32,
    pub jitter_strength: f32,
    /// Jitter is disabled at or below this energy.
    pub jitter_floor: f32,
    pub max_energy: f32,
    pub rest_energy_threshold: f32,
}

impl Default for SwirlConfig {
    fn default() -> Self {
        Self {
            strength: 0.09,
            decay_rate: 0.999,
            response: 0.1,
            jitter_strength: 0.05,
            jitter_floor: 1e-3,
            max_energy: DEFAULT_MAX_SWIRL_ENERGY,
            rest_energy_threshold: DEFAULT_REST_ENERGY_THRESHOLD,
        }
    }
}

/// Conversion of external acceleration samples into impulses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub multiplier: f32,
    /// Swirl energy gained per unit of sample intensity.
    pub energy_gain: f32,
    /// Samples stronger than this wake resting particles.
    pub wake_threshold: f32,
    /// Samples stronger than this also kick particles upward.
    pub kick_threshold: f32,
    pub kick_strength: f32,
    pub queue_capacity: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            multiplier: 0.25,
            energy_gain: 0.1,
            wake_threshold: 0.5,
            kick_threshold: 2.0,
            kick_strength: 0.1,
            queue_capacity: DEFAULT_MOTION_QUEUE_CAPACITY,
        }
    }
}

/// Friction and rest classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleConfig {
    pub ground_friction: f32,
    pub air_friction: f32,
    /// Grounded particles slower than this get the extra settle damping.
    pub settle_threshold: f32,
    pub settle_damping: f32,
    /// Grounded particles slower than this may come to rest.
    pub rest_threshold: f32,
    /// Grounded particles sinking slower than this are pinned to the ground.
    pub pin_speed: f32,
    /// Ground strikes slower than this stop dead instead of bouncing.
    pub bounce_speed: f32,
    pub bounce_restitution: f32,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            ground_friction: 1.0,
            air_friction: 0.985,
            settle_threshold: 0.1,
            settle_damping: 0.8,
            rest_threshold: 0.01,
            pin_speed: 0.5,
            bounce_speed: 1.0,
            bounce_restitution: 0.2,
        }
    }
}

/// Response to strikes against the glass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub wall_restitution: f32,
    /// Applied to the whole velocity after a wall reflection.
    pub wall_damping: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            wall_restitution: 0.8,
            wall_damping: 0.3,
        }
    }
}

/// Complete, immutable configuration of a globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub particle_count: usize,
    pub gravity: f32,
    pub globe: GlobeShape,
    pub spawn: SpawnConfig,
    pub swirl: SwirlConfig,
    pub motion: MotionConfig,
    pub settle: SettleConfig,
    pub collision: CollisionConfig,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            gravity: DEFAULT_GRAVITY,
            globe: GlobeShape::default(),
            spawn: SpawnConfig::default(),
            swirl: SwirlConfig::default(),
            motion: MotionConfig::default(),
            settle: SettleConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

impl GlobeConfig {
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Checks that every value keeps the simulation bounded and dissipative.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("gravity", self.gravity),
            ("globe.radius", self.globe.radius),
            ("globe.center.x", self.globe.center.x),
            ("globe.center.y", self.globe.center.y),
            ("globe.ground_level", self.globe.ground_level),
            ("globe.ground_tolerance", self.globe.ground_tolerance),
            ("globe.ground_inset", self.globe.ground_inset),
            ("spawn.spread", self.spawn.spread),
            ("spawn.stack_height", self.spawn.stack_height),
            ("swirl.strength", self.swirl.strength),
            ("swirl.response", self.swirl.response),
            ("swirl.jitter_strength", self.swirl.jitter_strength),
            ("swirl.jitter_floor", self.swirl.jitter_floor),
            ("swirl.rest_energy_threshold", self.swirl.rest_energy_threshold),
            ("motion.multiplier", self.motion.multiplier),
            ("motion.energy_gain", self.motion.energy_gain),
            ("motion.wake_threshold", self.motion.wake_threshold),
            ("motion.kick_threshold", self.motion.kick_threshold),
            ("motion.kick_strength", self.motion.kick_strength),
            ("settle.settle_threshold", self.settle.settle_threshold),
            ("settle.rest_threshold", self.settle.rest_threshold),
            ("settle.pin_speed", self.settle.pin_speed),
            ("settle.bounce_speed", self.settle.bounce_speed),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.globe.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(self.globe.radius));
        }

        let ranges = [
            ("spawn.size", self.spawn.min_size, self.spawn.max_size),
            ("spawn.mass", self.spawn.min_mass, self.spawn.max_mass),
            ("spawn.opacity", self.spawn.min_opacity, self.spawn.max_opacity),
        ];
        for (field, min, max) in ranges {
            if !min.is_finite() || !max.is_finite() {
                return Err(ConfigError::NotFinite {
                    field,
                    value: if min.is_finite() { max } else { min },
                });
            }
            if min > max {
                return Err(ConfigError::InvertedRange { field, min, max });
            }
        }

        check_range("spawn.min_size", self.spawn.min_size, 0.0, f32::MAX)?;
        check_range("globe.wall_margin", self.globe.wall_margin, 0.0, f32::MAX)?;
        check_range("globe.ground_tolerance", self.globe.ground_tolerance, 0.0, f32::MAX)?;
        check_range("globe.ground_inset", self.globe.ground_inset, 0.0, f32::MAX)?;
        check_range("settle.pin_speed", self.settle.pin_speed, 0.0, f32::MAX)?;
        check_range("settle.bounce_speed", self.settle.bounce_speed, 0.0, f32::MAX)?;
        if self.spawn.max_size + self.globe.wall_margin >= self.globe.radius {
            return Err(ConfigError::ParticleTooLarge {
                max_size: self.spawn.max_size,
                radius: self.globe.radius,
                margin: self.globe.wall_margin,
            });
        }

        check_range("swirl.decay_rate", self.swirl.decay_rate, 0.0, 1.0)?;
        check_range("swirl.max_energy", self.swirl.max_energy, 0.0, f32::MAX)?;
        check_range("settle.ground_friction", self.settle.ground_friction, 0.0, 1.0)?;
        check_range("settle.air_friction", self.settle.air_friction, 0.0, 1.0)?;
        check_range("settle.settle_damping", self.settle.settle_damping, 0.0, 1.0)?;
        // A full-elasticity bounce would let particles hop forever.
        check_range(
            "settle.bounce_restitution",
            self.settle.bounce_restitution,
            0.0,
            0.999,
        )?;
        check_range(
            "collision.wall_restitution",
            self.collision.wall_restitution,
            0.0,
            0.999,
        )?;
        check_range("collision.wall_damping", self.collision.wall_damping, 0.0, 1.0)?;

        Ok(())
    }
}

fn check_range(field: &'static str, value: f32, low: f32, high: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    if value < low || value > high {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            low,
            high,
        });
    }
    Ok(())
}
