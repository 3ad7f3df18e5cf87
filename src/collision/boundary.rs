use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GlobeConfig;

/// Result of constraining a particle against the glass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallContact {
    /// Particle was inside the containment circle.
    #[default]
    None,
    /// Position was projected back inside; velocity was already heading inward
    /// or the outward normal was undefined.
    Clamped,
    /// Position was projected back inside and the outward velocity reflected.
    Reflected,
}

impl WallContact {
    pub fn is_contact(self) -> bool {
        !matches!(self, WallContact::None)
    }
}

/// Circular cross-section of the globe.
///
/// Coordinates are globe-local with `y` growing downward, so the "ground" a
/// particle rests on is the lower arc of the circle. Every query here is pure
/// apart from [`GlobeBoundary::constrain`], which only touches the state it is
/// handed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobeBoundary {
    pub center: Vec2,
    pub radius: f32,
    pub wall_margin: f32,
    pub ground_tolerance: f32,
    pub ground_inset: f32,
    pub wall_restitution: f32,
    pub wall_damping: f32,
}

impl GlobeBoundary {
    pub fn from_config(config: &GlobeConfig) -> Self {
        Self {
            center: config.globe.center,
            radius: config.globe.radius,
            wall_margin: config.globe.wall_margin,
            ground_tolerance: config.globe.ground_tolerance,
            ground_inset: config.globe.ground_inset,
            wall_restitution: config.collision.wall_restitution,
            wall_damping: config.collision.wall_damping,
        }
    }

    /// Largest distance from the center a particle of `size` may reach.
    #[inline]
    pub fn containment_radius(&self, size: f32) -> f32 {
        (self.radius - size - self.wall_margin).max(0.0)
    }

    /// Radius of the glass surface a particle of `size` rolls along. It lies
    /// `wall_margin` outside the containment circle.
    #[inline]
    pub fn surface_radius(&self, size: f32) -> f32 {
        (self.radius - size).max(0.0)
    }

    /// Height of the glass surface below `x`; `center.y` past its edge.
    pub fn surface_height_at(&self, x: f32, size: f32) -> f32 {
        let r = self.surface_radius(size);
        let dx = x - self.center.x;
        self.center.y + (r * r - dx * dx).max(0.0).sqrt()
    }

    /// Height at which a particle of `size` comes to rest below `x`.
    ///
    /// This is the surface arc lifted by `ground_inset`, but never lower than
    /// the containment circle, so a snapped particle always stays contained.
    /// Past the edge of the surface arc the value degenerates to the vertical
    /// center.
    pub fn ground_height_at(&self, x: f32, size: f32) -> f32 {
        let r = self.surface_radius(size);
        let dx = x - self.center.x;
        let radicand = r * r - dx * dx;
        if radicand <= 0.0 {
            return self.center.y;
        }
        let arc = self.center.y + (radicand.sqrt() - self.ground_inset).max(0.0);

        let limit = self.containment_radius(size);
        let wall = self.center.y + (limit * limit - dx * dx).max(0.0).sqrt();
        arc.min(wall)
    }

    /// Whether a particle at `position` lies on the glass floor.
    ///
    /// Measured against the surface arc, which sits outside the containment
    /// circle. Near the equator the gap between the two exceeds
    /// `ground_tolerance`, so particles against the side glass are airborne
    /// and slide down.
    pub fn is_grounded(&self, position: Vec2, size: f32) -> bool {
        position.y >= self.surface_height_at(position.x, size) - self.ground_tolerance
    }

    /// Whether `position` satisfies the containment invariant for `size`.
    pub fn contains(&self, position: Vec2, size: f32, tolerance: f32) -> bool {
        position.distance(self.center) <= self.containment_radius(size) + tolerance
    }

    /// Projects a particle that left the containment circle back onto it and
    /// reflects the outward part of its velocity with a lossy restitution.
    pub fn constrain(&self, position: &mut Vec2, velocity: &mut Vec2, size: f32) -> WallContact {
        let limit = self.containment_radius(size);
        let offset = *position - self.center;
        let distance = offset.length();
        if distance <= limit {
            return WallContact::None;
        }

        // Undefined normal at the center: clamp only.
        let Some(normal) = offset.try_normalize() else {
            *position = self.center;
            return WallContact::Clamped;
        };

        *position = self.center + normal * limit;

        let outward = velocity.dot(normal);
        if outward <= 0.0 {
            return WallContact::Clamped;
        }

        *velocity -= (1.0 + self.wall_restitution) * outward * normal;
        *velocity *= self.wall_damping;
        WallContact::Reflected
    }
}
