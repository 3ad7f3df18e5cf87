use glam::Vec2;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    collision::{
        boundary::{GlobeBoundary, WallContact},
        ground::{correct_penetration, pin_to_ground, GroundContact},
    },
    config::{GlobeConfig, SettleConfig},
    core::particle::Particle,
    dynamics::{
        forces::{ForceEnv, ForceRegistry},
        friction::apply_friction,
        rest::RestPolicy,
    },
};

/// What happened to one particle during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParticleOutcome {
    /// The particle went through the full force/constraint pipeline.
    pub processed: bool,
    pub woke: bool,
    pub pinned: bool,
    pub wall: WallContact,
    pub ground: GroundContact,
    /// Came to rest this step.
    pub settled: bool,
    /// Resting once the step finished.
    pub resting: bool,
}

/// Per-step counters aggregated over every particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepTally {
    pub processed: usize,
    pub skipped: usize,
    pub woken: usize,
    pub settled: usize,
    pub resting: usize,
    pub wall_contacts: usize,
    pub wall_reflections: usize,
    pub ground_contacts: usize,
}

impl StepTally {
    pub fn record(mut self, outcome: ParticleOutcome) -> Self {
        if outcome.processed {
            self.processed += 1;
        } else {
            self.skipped += 1;
        }
        self.woken += outcome.woke as usize;
        self.settled += outcome.settled as usize;
        self.resting += outcome.resting as usize;
        self.wall_contacts += outcome.wall.is_contact() as usize;
        self.wall_reflections += (outcome.wall == WallContact::Reflected) as usize;
        self.ground_contacts += outcome.ground.is_contact() as usize;
        self
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            processed: self.processed + other.processed,
            skipped: self.skipped + other.skipped,
            woken: self.woken + other.woken,
            settled: self.settled + other.settled,
            resting: self.resting + other.resting,
            wall_contacts: self.wall_contacts + other.wall_contacts,
            wall_reflections: self.wall_reflections + other.wall_reflections,
            ground_contacts: self.ground_contacts + other.ground_contacts,
        }
    }

    pub fn active(&self) -> usize {
        self.processed + self.skipped - self.resting
    }
}

/// Advances particles one frame with semi-implicit Euler stepping and
/// resolves them against the globe.
///
/// Per active particle the order is fixed: forces, friction, position
/// update, circular clamp, ground correction, then rest classification, so the
/// classification always sees the corrected position.
#[derive(Debug, Clone)]
pub struct Integrator {
    boundary: GlobeBoundary,
    settle: SettleConfig,
    rest: RestPolicy,
    parallel: bool,
}

impl Integrator {
    pub fn new(config: &GlobeConfig) -> Self {
        Self {
            boundary: GlobeBoundary::from_config(config),
            settle: config.settle,
            rest: RestPolicy::from_config(config),
            parallel: false,
        }
    }

    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn boundary(&self) -> &GlobeBoundary {
        &self.boundary
    }

    pub fn rest_policy(&self) -> &RestPolicy {
        &self.rest
    }

    pub fn step_particle(
        &self,
        particle: &mut Particle,
        forces: &ForceRegistry,
        swirl_energy: f32,
        jitter: Vec2,
    ) -> ParticleOutcome {
        let mut outcome = ParticleOutcome::default();

        if particle.is_resting {
            if !self.rest.should_wake(particle, swirl_energy) {
                outcome.resting = true;
                return outcome;
            }
            particle.wake();
            outcome.woke = true;
        }
        outcome.processed = true;

        let speed = particle.speed();
        let grounded = self.boundary.is_grounded(particle.position, particle.size);

        let env = ForceEnv {
            swirl_energy,
            boundary: &self.boundary,
            jitter,
        };
        particle.velocity += forces.accumulate(particle, &env);

        apply_friction(particle, grounded, speed, &self.settle);
        if grounded {
            outcome.pinned = pin_to_ground(&self.boundary, particle, &self.settle);
        }

        particle.position += particle.velocity;

        outcome.wall =
            self.boundary
                .constrain(&mut particle.position, &mut particle.velocity, particle.size);
        outcome.ground = correct_penetration(&self.boundary, particle, &self.settle);

        outcome.settled = self.rest.try_settle(&self.boundary, particle, swirl_energy);
        outcome.resting = outcome.settled;
        outcome
    }

    /// Steps every particle. `jitter` holds one sample per particle; missing
    /// entries count as zero.
    pub fn step(
        &self,
        particles: &mut [Particle],
        jitter: &[Vec2],
        forces: &ForceRegistry,
        swirl_energy: f32,
    ) -> StepTally {
        let sample = |index: usize| jitter.get(index).copied().unwrap_or(Vec2::ZERO);

        #[cfg(feature = "parallel")]
        if self.parallel {
            return particles
                .par_iter_mut()
                .enumerate()
                .map(|(index, particle)| {
                    self.step_particle(particle, forces, swirl_energy, sample(index))
                })
                .fold(StepTally::default, StepTally::record)
                .reduce(StepTally::default, StepTally::merge);
        }

        particles
            .iter_mut()
            .enumerate()
            .map(|(index, particle)| self.step_particle(particle, forces, swirl_energy, sample(index)))
            .fold(StepTally::default(), StepTally::record)
    }
}
