use serde::{Deserialize, Serialize};

use crate::{
    collision::boundary::GlobeBoundary, config::SettleConfig, core::particle::Particle,
};

/// Outcome of the ground penetration check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroundContact {
    #[default]
    None,
    /// Snapped to the ground with vertical velocity killed.
    Landed,
    /// Snapped to the ground with a small, damped rebound.
    Bounced,
}

impl GroundContact {
    pub fn is_contact(self) -> bool {
        !matches!(self, GroundContact::None)
    }
}

/// Pins a grounded particle that is sinking slowly onto the ground.
///
/// Returns `true` if the particle was pinned.
pub fn pin_to_ground(boundary: &GlobeBoundary, particle: &mut Particle, settle: &SettleConfig) -> bool {
    let vy = particle.velocity.y;
    if vy <= 0.0 || vy >= settle.pin_speed {
        return false;
    }
    particle.velocity.y = 0.0;
    particle.position.y = boundary.ground_height_at(particle.position.x, particle.size);
    true
}

/// Lifts a particle that sank below its local ground height while moving down.
///
/// Slow strikes stop dead; faster ones rebound with `bounce_restitution`,
/// which is always below one.
pub fn correct_penetration(
    boundary: &GlobeBoundary,
    particle: &mut Particle,
    settle: &SettleConfig,
) -> GroundContact {
    if particle.velocity.y < 0.0 || !boundary.is_grounded(particle.position, particle.size) {
        return GroundContact::None;
    }

    let ground = boundary.ground_height_at(particle.position.x, particle.size);
    if particle.position.y <= ground {
        return GroundContact::None;
    }

    particle.position.y = ground;
    if particle.velocity.y.abs() < settle.bounce_speed {
        particle.velocity.y = 0.0;
        GroundContact::Landed
    } else {
        particle.velocity.y *= -settle.bounce_restitution;
        GroundContact::Bounced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlobeConfig;
    use glam::Vec2;

    fn setup() -> (GlobeBoundary, SettleConfig) {
        let config = GlobeConfig::default();
        (GlobeBoundary::from_config(&config), config.settle)
    }

    #[test]
    fn slow_sink_is_pinned() {
        let (boundary, settle) = setup();
        let mut particle = Particle::new(Vec2::new(150.0, 272.0), 3.0, 1.0);
        particle.velocity = Vec2::new(0.2, 0.3);
        assert!(pin_to_ground(&boundary, &mut particle, &settle));
        assert_eq!(particle.velocity, Vec2::new(0.2, 0.0));
        assert_eq!(particle.position.y, boundary.ground_height_at(150.0, 3.0));
    }

    #[test]
    fn rising_particle_is_not_pinned() {
        let (boundary, settle) = setup();
        let mut particle = Particle::new(Vec2::new(150.0, 272.0), 3.0, 1.0);
        particle.velocity = Vec2::new(0.0, -0.3);
        assert!(!pin_to_ground(&boundary, &mut particle, &settle));
        assert_eq!(particle.position.y, 272.0);
    }

    #[test]
    fn slow_penetration_lands() {
        let (boundary, settle) = setup();
        let ground = boundary.ground_height_at(150.0, 3.0);
        let mut particle = Particle::new(Vec2::new(150.0, ground + 1.0), 3.0, 1.0);
        particle.velocity = Vec2::new(0.0, 0.8);
        assert_eq!(
            correct_penetration(&boundary, &mut particle, &settle),
            GroundContact::Landed
        );
        assert_eq!(particle.position.y, ground);
        assert_eq!(particle.velocity.y, 0.0);
    }

    #[test]
    fn fast_penetration_bounces_softly() {
        let (boundary, settle) = setup();
        let ground = boundary.ground_height_at(150.0, 3.0);
        let mut particle = Particle::new(Vec2::new(150.0, ground + 1.0), 3.0, 1.0);
        particle.velocity = Vec2::new(0.0, 3.0);
        assert_eq!(
            correct_penetration(&boundary, &mut particle, &settle),
            GroundContact::Bounced
        );
        assert!((particle.velocity.y + 0.6).abs() < 1e-5);
    }

    #[test]
    fn particle_above_ground_is_untouched() {
        let (boundary, settle) = setup();
        let ground = boundary.ground_height_at(150.0, 3.0);
        let mut particle = Particle::new(Vec2::new(150.0, ground - 1.0), 3.0, 1.0);
        particle.velocity = Vec2::new(0.0, 0.5);
        assert_eq!(
            correct_penetration(&boundary, &mut particle, &settle),
            GroundContact::None
        );
        assert_eq!(particle.position.y, ground - 1.0);
    }
}
