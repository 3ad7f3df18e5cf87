//! Utility helpers: math extensions, logging timers, and step statistics.

pub mod logging;
pub mod math;
pub mod profiling;

pub use logging::{FrameBudget, PhaseTimer, StepPhase};
pub use math::*;
pub use profiling::StepStats;
