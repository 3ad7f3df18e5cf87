use glam::Vec2;
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    collision::boundary::GlobeBoundary,
    config::GlobeConfig,
    core::{particle::Particle, store::ParticleStore},
    dynamics::{
        forces::ForceRegistry,
        impulse::{ImpulseOutcome, MotionImpulse},
        integrator::{Integrator, StepTally},
    },
    error::Result,
    motion::{MotionInbox, MotionSample, MotionSender},
    render::{RenderFrame, RenderSink},
    utils::{
        logging::{FrameBudget, PhaseTimer, StepPhase},
        profiling::StepStats,
    },
};

/// Frames between periodic step reports at debug level.
const STATS_REPORT_INTERVAL: u64 = 600;

/// Simulation context owning every piece of mutable globe state.
///
/// Lifecycle: [`GlobeWorld::new`] → [`GlobeWorld::step`] once per display
/// refresh → [`GlobeWorld::dispose`]. Independent worlds share nothing.
pub struct GlobeWorld {
    config: GlobeConfig,
    particles: ParticleStore,
    integrator: Integrator,
    pub force_registry: ForceRegistry,
    swirl_energy: f32,
    last_motion: Option<MotionSample>,
    inbox: MotionInbox,
    rng: StdRng,
    jitter: Vec<Vec2>,
    pending: Vec<MotionSample>,
    frame: u64,
    budget: FrameBudget,
    disposed: bool,
}

impl GlobeWorld {
    /// Creates a world seeded from system entropy.
    pub fn new(config: GlobeConfig) -> Result<Self> {
        Self::build(config, StdRng::from_entropy())
    }

    /// Creates a world whose every random draw is reproducible from `seed`.
    pub fn with_seed(config: GlobeConfig, seed: u64) -> Result<Self> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: GlobeConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;

        let integrator = Integrator::new(&config);
        let particles = ParticleStore::spawn(&config, integrator.boundary(), &mut rng);
        info!(
            "created globe: {} particles ({} resting), radius {}",
            particles.len(),
            particles.resting_count(),
            config.globe.radius
        );

        Ok(Self {
            force_registry: ForceRegistry::from_config(&config),
            inbox: MotionInbox::new(config.motion.queue_capacity),
            jitter: Vec::with_capacity(particles.len()),
            pending: Vec::new(),
            config,
            particles,
            integrator,
            swirl_energy: 0.0,
            last_motion: None,
            rng,
            frame: 0,
            budget: FrameBudget::default(),
            disposed: false,
        })
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn boundary(&self) -> &GlobeBoundary {
        self.integrator.boundary()
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// Direct access for drivers that seed custom states. The containment
    /// invariant is re-established on the next step.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        self.particles.as_mut_slice()
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn swirl_energy(&self) -> f32 {
        self.swirl_energy
    }

    /// Overrides swirl energy, clamped to `[0, max_energy]`.
    pub fn set_swirl_energy(&mut self, energy: f32) {
        self.swirl_energy = if energy.is_finite() {
            energy.clamp(0.0, self.config.swirl.max_energy)
        } else {
            0.0
        };
    }

    pub fn last_motion(&self) -> Option<MotionSample> {
        self.last_motion
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn ground_height_at(&self, x: f32, size: f32) -> f32 {
        self.boundary().ground_height_at(x, size)
    }

    pub fn resting_count(&self) -> usize {
        self.particles.resting_count()
    }

    pub fn total_kinetic_energy(&self) -> f32 {
        self.particles.total_kinetic_energy()
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        if enabled && cfg!(not(feature = "parallel")) {
            log::warn!("parallel stepping requested but the `parallel` feature is disabled");
        }
        self.integrator.set_parallel(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.integrator.parallel()
    }

    /// Handle for delivering motion samples from other threads. Samples are
    /// applied at the start of the next step.
    pub fn motion_sender(&self) -> MotionSender {
        self.inbox.sender()
    }

    pub fn pending_motion(&self) -> usize {
        self.inbox.pending()
    }

    /// Applies a motion sample immediately, between steps.
    pub fn apply_motion(&mut self, sample: MotionSample) -> ImpulseOutcome {
        if self.disposed {
            return ImpulseOutcome::default();
        }

        let impulse = MotionImpulse::new(
            &self.config.motion,
            self.config.swirl.max_energy,
            self.config.settle.rest_threshold,
        );
        let outcome = impulse.apply(
            sample,
            self.particles.as_mut_slice(),
            &mut self.swirl_energy,
            &mut self.rng,
        );
        self.last_motion = Some(sample.sanitized());

        if outcome.woken > 0 {
            debug!(
                "motion sample (intensity {:.3}) woke {} particles, energy now {:.3}",
                outcome.intensity, outcome.woken, self.swirl_energy
            );
        }
        outcome
    }

    /// Advances the globe by one frame.
    ///
    /// Queued motion samples are applied first, then swirl energy decays,
    /// then every particle is integrated and constrained. A disposed world
    /// does nothing.
    pub fn step(&mut self) -> StepStats {
        if self.disposed {
            return StepStats {
                frame: self.frame,
                particle_count: self.particles.len(),
                swirl_energy: self.swirl_energy,
                tally: StepTally {
                    skipped: self.particles.len(),
                    resting: self.particles.resting_count(),
                    ..StepTally::default()
                },
                ..StepStats::default()
            };
        }

        self.frame += 1;
        let step_timer = PhaseTimer::start(self.frame, StepPhase::Step);

        let motion_timer = PhaseTimer::start(self.frame, StepPhase::Motion);
        let mut samples = std::mem::take(&mut self.pending);
        samples.clear();
        self.inbox.drain_into(&mut samples);
        for sample in &samples {
            self.apply_motion(*sample);
        }
        let motion_samples = samples.len();
        self.pending = samples;
        let motion_time = motion_timer.elapsed();
        drop(motion_timer);

        self.swirl_energy *= self.config.swirl.decay_rate;
        if self.swirl_energy < f32::MIN_POSITIVE {
            self.swirl_energy = 0.0;
        }
        self.draw_jitter();

        let integrate_timer = PhaseTimer::start(self.frame, StepPhase::Integrate);
        let tally = self.integrator.step(
            self.particles.as_mut_slice(),
            &self.jitter,
            &self.force_registry,
            self.swirl_energy,
        );
        let integrate_time = integrate_timer.elapsed();
        drop(integrate_timer);

        if tally.woken > 0 || tally.settled > 0 {
            debug!(
                "frame {}: {} woke, {} settled, {} resting",
                self.frame, tally.woken, tally.settled, tally.resting
            );
        }

        let stats = StepStats {
            frame: self.frame,
            particle_count: self.particles.len(),
            tally,
            swirl_energy: self.swirl_energy,
            motion_samples,
            motion_time,
            integrate_time,
            total_time: step_timer.elapsed(),
        };
        self.budget.check(self.frame, self.particles.len(), stats.total_time);
        if self.frame % STATS_REPORT_INTERVAL == 0 {
            stats.report();
        }
        stats
    }

    /// Runs `frames` steps and returns the stats of the last one.
    pub fn step_n(&mut self, frames: u32) -> StepStats {
        let mut stats = StepStats::default();
        for _ in 0..frames {
            stats = self.step();
        }
        stats
    }

    fn draw_jitter(&mut self) {
        self.jitter.clear();
        if self.swirl_energy <= self.config.swirl.jitter_floor {
            return;
        }
        let rng = &mut self.rng;
        self.jitter.extend(
            (0..self.particles.len())
                .map(|_| Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)),
        );
    }

    /// Feeds every particle's position, size and opacity to `sink`.
    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        sink.begin_frame(self.particles.len());
        for particle in &self.particles {
            sink.draw(
                particle.render_handle,
                particle.position,
                particle.size,
                particle.opacity,
            );
        }
        sink.end_frame();
    }

    pub fn snapshot(&self) -> RenderFrame {
        let mut frame = RenderFrame::new();
        frame.sync(&self.particles);
        frame
    }

    /// Stops the simulation and rejects further motion samples.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.inbox.close();
        info!("globe disposed after {} frames", self.frame);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(count: usize) -> GlobeWorld {
        GlobeWorld::with_seed(GlobeConfig::default().with_particle_count(count), 42)
            .expect("default config is valid")
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = GlobeConfig::default();
        config.globe.radius = -1.0;
        assert!(GlobeWorld::new(config).is_err());
    }

    #[test]
    fn step_advances_frame_and_decays_energy() {
        let mut world = world(10);
        world.set_swirl_energy(5.0);
        let stats = world.step();
        assert_eq!(stats.frame, 1);
        assert!((world.swirl_energy() - 5.0 * 0.999).abs() < 1e-6);
        assert_eq!(stats.particle_count, 10);
    }

    #[test]
    fn swirl_energy_override_is_clamped() {
        let mut world = world(1);
        world.set_swirl_energy(50.0);
        assert_eq!(world.swirl_energy(), 10.0);
        world.set_swirl_energy(-3.0);
        assert_eq!(world.swirl_energy(), 0.0);
        world.set_swirl_energy(f32::NAN);
        assert_eq!(world.swirl_energy(), 0.0);
    }

    #[test]
    fn queued_samples_apply_on_next_step() {
        let mut world = world(20);
        let sender = world.motion_sender();
        assert!(sender.send(MotionSample::new(5.0, -3.0, 0.0)));
        assert_eq!(world.swirl_energy(), 0.0);
        assert_eq!(world.pending_motion(), 1);

        let stats = world.step();
        assert_eq!(stats.motion_samples, 1);
        assert_eq!(world.pending_motion(), 0);
        assert!(world.swirl_energy() > 0.5);
        assert_eq!(world.last_motion(), Some(MotionSample::new(5.0, -3.0, 0.0)));
    }

    #[test]
    fn disposed_world_is_frozen() {
        let mut world = world(20);
        let sender = world.motion_sender();
        world.dispose();
        assert!(world.is_disposed());
        assert!(!sender.send(MotionSample::new(5.0, 0.0, 0.0)));

        let before: Vec<Vec2> = world.particles().iter().map(|p| p.position).collect();
        let stats = world.step();
        assert_eq!(stats.frame, 0);
        let after: Vec<Vec2> = world.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(world.apply_motion(MotionSample::new(9.0, 9.0, 0.0)).intensity, 0.0);
    }

    #[test]
    fn jitter_only_drawn_while_turbulent() {
        let mut world = world(5);
        world.step();
        assert!(world.jitter.is_empty());
        world.set_swirl_energy(3.0);
        world.step();
        assert_eq!(world.jitter.len(), 5);
    }
}
