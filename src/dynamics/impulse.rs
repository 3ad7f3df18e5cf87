use rand::Rng;

use glam::Vec2;

use crate::{config::MotionConfig, core::particle::Particle, motion::MotionSample};

/// What a single motion sample did to the globe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImpulseOutcome {
    pub intensity: f32,
    /// Swirl energy actually added, after the cap.
    pub energy_gained: f32,
    pub woken: usize,
    pub pushed: usize,
    pub kicked: bool,
}

/// Converts a motion sample into swirl energy and per-particle velocity kicks.
pub struct MotionImpulse<'a> {
    pub motion: &'a MotionConfig,
    pub max_energy: f32,
    /// A resting particle pushed to this speed or faster is woken.
    pub rest_threshold: f32,
}

impl<'a> MotionImpulse<'a> {
    pub fn new(motion: &'a MotionConfig, max_energy: f32, rest_threshold: f32) -> Self {
        Self {
            motion,
            max_energy,
            rest_threshold,
        }
    }

    /// Swirl energy after absorbing a sample of `intensity`.
    pub fn charged_energy(&self, swirl_energy: f32, intensity: f32) -> f32 {
        (swirl_energy + intensity * self.motion.energy_gain).min(self.max_energy)
    }

    /// Applies `sample` to every particle and raises `swirl_energy`.
    ///
    /// A sample above the wake threshold wakes every particle. Every particle
    /// then receives the sample scaled by a randomized factor so the cloud
    /// does not move as a rigid block, plus an upward kick for strong samples.
    /// A resting particle the push leaves slower than the rest threshold stays
    /// at rest with zero velocity; a faster one is woken.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        sample: MotionSample,
        particles: &mut [Particle],
        swirl_energy: &mut f32,
        rng: &mut R,
    ) -> ImpulseOutcome {
        let sample = sample.sanitized();
        let intensity = sample.intensity();
        let previous = *swirl_energy;
        *swirl_energy = self.charged_energy(previous, intensity);

        let wakes = intensity > self.motion.wake_threshold;
        let kicked = intensity > self.motion.kick_threshold;
        let planar = sample.planar();

        let mut outcome = ImpulseOutcome {
            intensity,
            energy_gained: *swirl_energy - previous,
            kicked,
            ..ImpulseOutcome::default()
        };

        for particle in particles.iter_mut() {
            if wakes && particle.wake() {
                outcome.woken += 1;
            }

            let disturb = self.motion.multiplier * (0.5 + rng.gen::<f32>() * 0.5);
            particle.velocity += planar * disturb;
            if kicked {
                particle.velocity.y -= intensity * self.motion.kick_strength * rng.gen::<f32>();
            }
            outcome.pushed += 1;

            if particle.is_resting {
                if particle.speed() >= self.rest_threshold {
                    particle.wake();
                    outcome.woken += 1;
                } else {
                    particle.velocity = Vec2::ZERO;
                }
            }
        }

        outcome
    }
}
