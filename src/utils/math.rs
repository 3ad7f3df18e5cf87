//! Additional math helpers layered on top of `glam`.

use glam::Vec2;

/// Counter-clockwise unit tangent for polar angle `angle` (in screen space,
/// where `y` grows downward, this turns clockwise on screen).
#[inline]
pub fn tangent_at(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(-sin, cos)
}

/// Polar angle of `offset`. Zero for the zero vector.
#[inline]
pub fn polar_angle(offset: Vec2) -> f32 {
    if offset == Vec2::ZERO {
        return 0.0;
    }
    offset.y.atan2(offset.x)
}

/// Number of geometric decay steps needed for `start` to fall below `target`.
pub fn decay_steps(start: f32, target: f32, rate: f32) -> Option<u32> {
    if start < target {
        return Some(0);
    }
    if target <= 0.0 || !(0.0..1.0).contains(&rate) {
        return None;
    }
    let steps = ((target / start).ln() / rate.ln()).floor() as u32 + 1;
    Some(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn tangent_is_perpendicular_to_radius() {
        for angle in [0.0_f32, 0.7, FRAC_PI_2, 2.5, -1.2] {
            let radial = Vec2::new(angle.cos(), angle.sin());
            assert!(tangent_at(angle).dot(radial).abs() < 1e-5);
            assert!((tangent_at(angle).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn polar_angle_of_origin_is_zero() {
        assert_eq!(polar_angle(Vec2::ZERO), 0.0);
        assert!((polar_angle(Vec2::new(0.0, 2.0)) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn decay_steps_matches_rate() {
        let steps = decay_steps(10.0, 0.1, 0.999).expect("decaying rate");
        assert!((4600..=4610).contains(&steps), "steps = {steps}");
        assert_eq!(decay_steps(0.05, 0.1, 0.999), Some(0));
        assert_eq!(decay_steps(10.0, 0.1, 1.0), None);
    }
}
