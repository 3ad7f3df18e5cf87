use log::{log_enabled, warn, Level};
use std::time::{Duration, Instant};

/// Display refresh rate the step loop is expected to keep up with.
pub const TARGET_REFRESH_HZ: u32 = 60;

/// Sections of a globe step that get their own trace timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    Step,
    Motion,
    Integrate,
}

impl StepPhase {
    pub fn label(self) -> &'static str {
        match self {
            StepPhase::Step => "step",
            StepPhase::Motion => "motion",
            StepPhase::Integrate => "integrate",
        }
    }
}

/// Traces how long one phase of a given frame took, on drop.
pub struct PhaseTimer {
    frame: u64,
    phase: StepPhase,
    start: Instant,
}

impl PhaseTimer {
    pub fn start(frame: u64, phase: StepPhase) -> Self {
        Self {
            frame,
            phase,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            log::trace!(
                "frame {} {}: {} µs",
                self.frame,
                self.phase.label(),
                self.start.elapsed().as_micros()
            );
        }
    }
}

/// Time one step may take before the globe stutters on the target display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBudget {
    refresh_hz: u32,
    budget: Duration,
}

impl Default for FrameBudget {
    fn default() -> Self {
        Self::for_refresh_rate(TARGET_REFRESH_HZ)
    }
}

impl FrameBudget {
    pub fn for_refresh_rate(refresh_hz: u32) -> Self {
        let refresh_hz = refresh_hz.max(1);
        Self {
            refresh_hz,
            budget: Duration::from_secs_f64(1.0 / f64::from(refresh_hz)),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Warns when stepping `particle_count` particles took longer than one
    /// refresh. Returns `true` if the budget was blown.
    pub fn check(&self, frame: u64, particle_count: usize, elapsed: Duration) -> bool {
        if elapsed <= self.budget {
            return false;
        }
        warn!(
            "frame {frame}: stepping {particle_count} particles took {:.2} ms, over the {:.2} ms of a {} Hz refresh",
            elapsed.as_secs_f32() * 1000.0,
            self.budget.as_secs_f32() * 1000.0,
            self.refresh_hz
        );
        true
    }
}
