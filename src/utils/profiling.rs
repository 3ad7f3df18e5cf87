use std::time::Duration;

use log::debug;

use crate::dynamics::integrator::StepTally;

/// Summary of one simulation step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepStats {
    /// Frame number of this step, starting at 1.
    pub frame: u64,
    pub particle_count: usize,
    pub tally: StepTally,
    /// Swirl energy the particles were stepped with (after decay).
    pub swirl_energy: f32,
    /// Motion samples applied at the start of the step.
    pub motion_samples: usize,
    pub motion_time: Duration,
    pub integrate_time: Duration,
    pub total_time: Duration,
}

impl StepStats {
    pub fn resting(&self) -> usize {
        self.tally.resting
    }

    pub fn active(&self) -> usize {
        self.particle_count - self.tally.resting
    }

    pub fn resting_fraction(&self) -> f32 {
        if self.particle_count == 0 {
            return 1.0;
        }
        self.tally.resting as f32 / self.particle_count as f32
    }

    pub fn report(&self) {
        debug!(
            "frame {}: {} active / {} resting, energy {:.4}, {} samples, {} wall hits, {} ground hits",
            self.frame,
            self.active(),
            self.resting(),
            self.swirl_energy,
            self.motion_samples,
            self.tally.wall_contacts,
            self.tally.ground_contacts
        );
        debug!(
            "  motion {:.3} ms, integrate {:.3} ms, total {:.3} ms",
            self.motion_time.as_secs_f32() * 1000.0,
            self.integrate_time.as_secs_f32() * 1000.0,
            self.total_time.as_secs_f32() * 1000.0
        );
    }
}
