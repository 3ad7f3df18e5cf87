use crate::{config::SettleConfig, core::particle::Particle};

/// Which damping regime was applied to a particle this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrictionRegime {
    Air,
    Ground,
    /// Ground friction plus the extra settle damping for slow particles.
    Settling,
}

/// Damps a particle's velocity according to whether it lies on the ground.
///
/// `speed` is the speed the particle entered the frame with; a grounded
/// particle that was already slow gets the extra settle damping so it creeps
/// toward rest instead of sliding forever.
pub fn apply_friction(
    particle: &mut Particle,
    grounded: bool,
    speed: f32,
    settle: &SettleConfig,
) -> FrictionRegime {
    if !grounded {
        particle.velocity *= settle.air_friction;
        return FrictionRegime::Air;
    }

    particle.velocity *= settle.ground_friction;
    if speed < settle.settle_threshold {
        particle.velocity *= settle.settle_damping;
        return FrictionRegime::Settling;
    }
    FrictionRegime::Ground
}
