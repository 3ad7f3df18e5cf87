use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One device acceleration reading with gravity excluded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MotionSample {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Replaces missing or non-finite axes with zero.
    pub fn sanitized(self) -> Self {
        let clean = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            x: clean(self.x),
            y: clean(self.y),
            z: clean(self.z),
        }
    }

    /// Horizontal and vertical components in globe space.
    #[inline]
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Strength of the sample in the plane of the globe; `z` is ignored.
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.planar().length()
    }
}

impl From<[f32; 3]> for MotionSample {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}
