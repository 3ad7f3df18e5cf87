use serde::{Deserialize, Serialize};

use crate::{collision::boundary::GlobeBoundary, config::GlobeConfig, core::particle::Particle};

/// Two-state classification of every particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestState {
    /// Pinned to its ground height with zero velocity; skipped by the integrator.
    Resting,
    Active,
}

impl RestState {
    pub fn of(particle: &Particle) -> Self {
        if particle.is_resting {
            RestState::Resting
        } else {
            RestState::Active
        }
    }
}

/// Rules for moving particles between [`RestState::Active`] and [`RestState::Resting`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestPolicy {
    /// Particles slower than this may rest.
    pub rest_threshold: f32,
    /// Nothing rests, and resting particles wake, at or above this swirl energy.
    pub energy_threshold: f32,
}

impl RestPolicy {
    pub fn from_config(config: &GlobeConfig) -> Self {
        Self {
            rest_threshold: config.settle.rest_threshold,
            energy_threshold: config.swirl.rest_energy_threshold,
        }
    }

    #[inline]
    pub fn energy_allows_rest(&self, swirl_energy: f32) -> bool {
        swirl_energy < self.energy_threshold
    }

    /// A resting particle is woken by turbulence that has not died down.
    #[inline]
    pub fn should_wake(&self, particle: &Particle, swirl_energy: f32) -> bool {
        particle.is_resting && !self.energy_allows_rest(swirl_energy)
    }

    /// Puts the particle to rest when it is grounded, slow, and the globe is calm.
    ///
    /// On success the velocity is zeroed and the particle snapped exactly to
    /// its ground height.
    pub fn try_settle(
        &self,
        boundary: &GlobeBoundary,
        particle: &mut Particle,
        swirl_energy: f32,
    ) -> bool {
        if !self.energy_allows_rest(swirl_energy)
            || particle.speed() >= self.rest_threshold
            || !boundary.is_grounded(particle.position, particle.size)
        {
            return false;
        }

        let ground = boundary.ground_height_at(particle.position.x, particle.size);
        particle.settle_at(ground);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup() -> (GlobeBoundary, RestPolicy) {
        let config = GlobeConfig::default();
        (
            GlobeBoundary::from_config(&config),
            RestPolicy::from_config(&config),
        )
    }

    #[test]
    fn slow_grounded_particle_settles_on_calm_globe() {
        let (boundary, policy) = setup();
        let ground = boundary.ground_height_at(170.0, 4.0);
        let mut particle = Particle::new(Vec2::new(170.0, ground - 0.5), 4.0, 1.0);
        particle.velocity = Vec2::new(0.005, 0.0);

        assert!(policy.try_settle(&boundary, &mut particle, 0.05));
        assert_eq!(RestState::of(&particle), RestState::Resting);
        assert_eq!(particle.position.y, ground);
        assert_eq!(particle.velocity, Vec2::ZERO);
    }

    #[test]
    fn turbulence_prevents_rest() {
        let (boundary, policy) = setup();
        let ground = boundary.ground_height_at(150.0, 2.0);
        let mut particle = Particle::new(Vec2::new(150.0, ground), 2.0, 1.0);
        assert!(!policy.try_settle(&boundary, &mut particle, 0.1));
        assert_eq!(RestState::of(&particle), RestState::Active);
    }

    #[test]
    fn airborne_particle_never_rests() {
        let (boundary, policy) = setup();
        let mut particle = Particle::new(boundary.center, 2.0, 1.0);
        assert!(!policy.try_settle(&boundary, &mut particle, 0.0));
    }

    #[test]
    fn moving_particle_never_rests() {
        let (boundary, policy) = setup();
        let ground = boundary.ground_height_at(150.0, 2.0);
        let mut particle = Particle::new(Vec2::new(150.0, ground), 2.0, 1.0);
        particle.velocity = Vec2::new(0.02, 0.0);
        assert!(!policy.try_settle(&boundary, &mut particle, 0.0));
    }

    #[test]
    fn lingering_energy_wakes_resting_particles() {
        let (_, policy) = setup();
        let mut particle = Particle::new(Vec2::ZERO, 2.0, 1.0);
        particle.is_resting = true;
        assert!(policy.should_wake(&particle, 0.5));
        assert!(!policy.should_wake(&particle, 0.01));
    }
}
