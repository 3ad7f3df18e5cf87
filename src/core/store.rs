use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::{
    collision::boundary::GlobeBoundary,
    config::GlobeConfig,
    core::particle::{Particle, RenderHandle},
};

/// Fixed-size storage for every particle of a globe.
///
/// The particle count is decided at creation and never changes.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Creates `config.particle_count` particles piled on the ground arc.
    ///
    /// Particles are spread horizontally around the center and stacked a
    /// little above `ground_level`, less so toward the sides. Anything that
    /// lands on the ground is pinned there at rest; the rest start active and
    /// drop onto the pile within a few frames.
    pub fn spawn<R: Rng + ?Sized>(
        config: &GlobeConfig,
        boundary: &GlobeBoundary,
        rng: &mut R,
    ) -> Self {
        let spawn = &config.spawn;
        let radius = config.globe.radius;
        let center = config.globe.center;

        let particles = (0..config.particle_count)
            .map(|index| {
                let spread_x = (rng.gen::<f32>() - 0.5) * radius * spawn.spread;
                let stack = rng.gen::<f32>()
                    * spawn.stack_height
                    * (1.0 - (spread_x.abs() / radius)).max(0.0);

                let mut particle = Particle {
                    position: Vec2::new(center.x + spread_x, config.globe.ground_level - stack),
                    velocity: Vec2::ZERO,
                    size: lerp(spawn.min_size, spawn.max_size, rng.gen()),
                    mass: lerp(spawn.min_mass, spawn.max_mass, rng.gen()),
                    opacity: lerp(spawn.min_opacity, spawn.max_opacity, rng.gen()),
                    is_resting: false,
                    swirl_phase: rng.gen::<f32>() * TAU,
                    render_handle: RenderHandle(index as u32),
                };

                boundary.constrain(&mut particle.position, &mut particle.velocity, particle.size);
                if boundary.is_grounded(particle.position, particle.size) {
                    let ground = boundary.ground_height_at(particle.position.x, particle.size);
                    particle.settle_at(ground);
                }
                particle
            })
            .collect();

        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn resting_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_resting).count()
    }

    pub fn total_kinetic_energy(&self) -> f32 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[inline]
fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn spawn(seed: u64) -> (GlobeConfig, GlobeBoundary, ParticleStore) {
        let config = GlobeConfig::default();
        let boundary = GlobeBoundary::from_config(&config);
        let mut rng = StdRng::seed_from_u64(seed);
        let store = ParticleStore::spawn(&config, &boundary, &mut rng);
        (config, boundary, store)
    }

    #[test]
    fn spawns_configured_count_with_sequential_handles() {
        let (config, _, store) = spawn(7);
        assert_eq!(store.len(), config.particle_count);
        for (index, particle) in store.iter().enumerate() {
            assert_eq!(particle.render_handle.index(), index);
        }
    }

    #[test]
    fn spawned_attributes_respect_ranges() {
        let (config, boundary, store) = spawn(11);
        for p in &store {
            assert!(p.size >= config.spawn.min_size && p.size <= config.spawn.max_size);
            assert!(p.mass >= config.spawn.min_mass && p.mass <= config.spawn.max_mass);
            assert!(p.opacity >= config.spawn.min_opacity && p.opacity <= config.spawn.max_opacity);
            assert!((0.0..TAU).contains(&p.swirl_phase));
            assert!(boundary.contains(p.position, p.size, 1e-3));
            assert_eq!(p.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn grounded_spawns_start_pinned_at_rest() {
        let (_, boundary, store) = spawn(3);
        assert!(store.resting_count() > 0);
        for p in store.iter().filter(|p| p.is_resting) {
            assert_eq!(p.position.y, boundary.ground_height_at(p.position.x, p.size));
        }
    }
}
