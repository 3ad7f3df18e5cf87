//! Simulation dynamics: forces, motion impulses, friction, integration and rest classification.

pub mod forces;
pub mod friction;
pub mod impulse;
pub mod integrator;
pub mod rest;

pub use forces::{ForceEnv, ForceGenerator, ForceRegistry, GravityForce, JitterForce, SwirlForce};
pub use friction::{apply_friction, FrictionRegime};
pub use impulse::{ImpulseOutcome, MotionImpulse};
pub use integrator::{Integrator, ParticleOutcome, StepTally};
pub use rest::{RestPolicy, RestState};
