use glam::Vec2;

use crate::{
    collision::boundary::GlobeBoundary,
    config::GlobeConfig,
    core::particle::Particle,
    utils::math::{polar_angle, tangent_at},
};

/// Per-particle inputs shared by every force generator during a step.
#[derive(Debug, Clone, Copy)]
pub struct ForceEnv<'a> {
    pub swirl_energy: f32,
    pub boundary: &'a GlobeBoundary,
    /// Centered random sample in `[-0.5, 0.5)` per axis, drawn for this particle.
    pub jitter: Vec2,
}

/// Trait describing a continuous force acting on active particles.
///
/// Generators return the per-frame velocity change they contribute.
pub trait ForceGenerator: Send + Sync {
    fn acceleration(&self, particle: &Particle, env: &ForceEnv) -> Vec2;
}

/// Constant downward pull scaled by particle mass.
pub struct GravityForce {
    pub gravity: f32,
}

impl GravityForce {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }
}

impl ForceGenerator for GravityForce {
    fn acceleration(&self, particle: &Particle, _env: &ForceEnv) -> Vec2 {
        Vec2::new(0.0, self.gravity * particle.mass)
    }
}

/// Tangential swirl, strongest against the glass and vanishing at the center.
pub struct SwirlForce {
    pub strength: f32,
    pub response: f32,
}

impl ForceGenerator for SwirlForce {
    fn acceleration(&self, particle: &Particle, env: &ForceEnv) -> Vec2 {
        if env.swirl_energy <= 0.0 {
            return Vec2::ZERO;
        }

        let offset = particle.position - env.boundary.center;
        let distance = offset.length();
        let factor =
            env.swirl_energy * self.strength * (distance / env.boundary.radius) * self.response;
        if factor == 0.0 {
            return Vec2::ZERO;
        }

        tangent_at(polar_angle(offset) + particle.swirl_phase) * factor
    }
}

/// Small random kicks while the globe is still turbulent.
pub struct JitterForce {
    pub strength: f32,
    /// No jitter at or below this energy.
    pub floor: f32,
}

impl ForceGenerator for JitterForce {
    fn acceleration(&self, _particle: &Particle, env: &ForceEnv) -> Vec2 {
        if env.swirl_energy <= self.floor {
            return Vec2::ZERO;
        }
        env.jitter * env.swirl_energy * self.strength
    }
}

/// Collection of forces summed for every active particle each frame.
pub struct ForceRegistry {
    forces: Vec<Box<dyn ForceGenerator>>,
}

impl Default for ForceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }

    /// Swirl, jitter and gravity as configured.
    pub fn from_config(config: &GlobeConfig) -> Self {
        let mut registry = Self::new();
        registry.add_force(SwirlForce {
            strength: config.swirl.strength,
            response: config.swirl.response,
        });
        registry.add_force(JitterForce {
            strength: config.swirl.jitter_strength,
            floor: config.swirl.jitter_floor,
        });
        registry.add_force(GravityForce::new(config.gravity));
        registry
    }

    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn accumulate(&self, particle: &Particle, env: &ForceEnv) -> Vec2 {
        self.forces
            .iter()
            .fold(Vec2::ZERO, |total, force| total + force.acceleration(particle, env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(boundary: &GlobeBoundary, swirl_energy: f32, jitter: Vec2) -> ForceEnv<'_> {
        ForceEnv {
            swirl_energy,
            boundary,
            jitter,
        }
    }

    #[test]
    fn gravity_scales_with_mass() {
        let boundary = GlobeBoundary::from_config(&GlobeConfig::default());
        let gravity = GravityForce::new(0.015);
        let light = Particle::new(Vec2::new(150.0, 150.0), 2.0, 0.5);
        let heavy = Particle::new(Vec2::new(150.0, 150.0), 2.0, 1.0);
        let e = env(&boundary, 0.0, Vec2::ZERO);
        assert!((gravity.acceleration(&light, &e).y - 0.0075).abs() < 1e-7);
        assert!((gravity.acceleration(&heavy, &e).y - 0.015).abs() < 1e-7);
    }

    #[test]
    fn swirl_vanishes_at_center_and_grows_outward() {
        let boundary = GlobeBoundary::from_config(&GlobeConfig::default());
        let swirl = SwirlForce {
            strength: 0.09,
            response: 0.1,
        };
        let e = env(&boundary, 5.0, Vec2::ZERO);

        let center = Particle::new(boundary.center, 2.0, 1.0);
        assert_eq!(swirl.acceleration(&center, &e), Vec2::ZERO);

        let near = Particle::new(boundary.center + Vec2::new(20.0, 0.0), 2.0, 1.0);
        let far = Particle::new(boundary.center + Vec2::new(100.0, 0.0), 2.0, 1.0);
        let near_a = swirl.acceleration(&near, &e);
        let far_a = swirl.acceleration(&far, &e);
        assert!(far_a.length() > near_a.length());
        // Zero phase: purely tangential.
        assert!(far_a.x.abs() < 1e-6);
        let expected = 5.0 * 0.09 * (100.0 / 130.0) * 0.1;
        assert!((far_a.y - expected).abs() < 1e-6);
    }

    #[test]
    fn swirl_phase_rotates_direction() {
        let boundary = GlobeBoundary::from_config(&GlobeConfig::default());
        let swirl = SwirlForce {
            strength: 0.09,
            response: 0.1,
        };
        let e = env(&boundary, 5.0, Vec2::ZERO);
        let mut a = Particle::new(boundary.center + Vec2::new(100.0, 0.0), 2.0, 1.0);
        let mut b = a;
        a.swirl_phase = 0.0;
        b.swirl_phase = std::f32::consts::PI;
        let da = swirl.acceleration(&a, &e);
        let db = swirl.acceleration(&b, &e);
        assert!((da + db).length() < 1e-5);
    }

    #[test]
    fn jitter_is_gated_by_energy() {
        let boundary = GlobeBoundary::from_config(&GlobeConfig::default());
        let jitter = JitterForce {
            strength: 0.05,
            floor: 1e-3,
        };
        let particle = Particle::new(boundary.center, 2.0, 1.0);
        let sample = Vec2::new(0.4, -0.2);
        assert_eq!(
            jitter.acceleration(&particle, &env(&boundary, 0.0005, sample)),
            Vec2::ZERO
        );
        let kicked = jitter.acceleration(&particle, &env(&boundary, 2.0, sample));
        assert!((kicked - Vec2::new(0.04, -0.02)).length() < 1e-6);
    }

    #[test]
    fn registry_sums_every_generator() {
        let config = GlobeConfig::default();
        let boundary = GlobeBoundary::from_config(&config);
        let registry = ForceRegistry::from_config(&config);
        assert_eq!(registry.len(), 3);

        let particle = Particle::new(boundary.center + Vec2::new(0.0, 50.0), 2.0, 1.0);
        let calm = registry.accumulate(&particle, &env(&boundary, 0.0, Vec2::splat(0.3)));
        assert!((calm - Vec2::new(0.0, 0.015)).length() < 1e-7);
    }
}
