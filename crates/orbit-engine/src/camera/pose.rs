use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::extensions::easing::lerp_dvec3;

/// Below this length a direction between two points is considered undefined.
pub const DIRECTION_EPSILON: f64 = 1e-9;

/// A (position, look-at point) pair that fully determines a camera's framing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: DVec3,
    pub look_at: DVec3,
}

impl CameraPose {
    pub const fn new(position: DVec3, look_at: DVec3) -> Self {
        Self { position, look_at }
    }

    /// Larger of the position and look-at distances to another pose.
    pub fn distance(&self, other: &CameraPose) -> f64 {
        self.position
            .distance(other.position)
            .max(self.look_at.distance(other.look_at))
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(DVec3::new(3.0, 0.0, 0.0), DVec3::ZERO)
    }
}

/// Linearly interpolate both halves of a pose by an already-eased `t`.
#[inline]
pub fn interpolate(start: &CameraPose, end: &CameraPose, eased_t: f64) -> CameraPose {
    CameraPose {
        position: lerp_dvec3(start.position, end.position, eased_t),
        look_at: lerp_dvec3(start.look_at, end.look_at, eased_t),
    }
}

/// Unit vector pointing from `from` to `to`, or `fallback` when the two
/// points (nearly) coincide.
#[inline]
pub fn direction_or(from: DVec3, to: DVec3, fallback: DVec3) -> DVec3 {
    unit_or(to - from, fallback)
}

/// `v` normalized, or `fallback` when `v` is too short to normalize.
#[inline]
pub fn unit_or(v: DVec3, fallback: DVec3) -> DVec3 {
    let len = v.length();
    if len.is_finite() && len > DIRECTION_EPSILON {
        v / len
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_endpoints() {
        let a = CameraPose::new(DVec3::new(1.0, 2.0, 3.0), DVec3::ZERO);
        let b = CameraPose::new(DVec3::new(-4.0, 0.0, 8.0), DVec3::new(1.0, 1.0, 1.0));
        assert!(interpolate(&a, &b, 0.0).distance(&a) < 1e-12);
        assert!(interpolate(&a, &b, 1.0).distance(&b) < 1e-12);
    }

    #[test]
    fn interpolate_midpoint() {
        let a = CameraPose::new(DVec3::ZERO, DVec3::ZERO);
        let b = CameraPose::new(DVec3::new(10.0, 0.0, 0.0), DVec3::new(0.0, 4.0, 0.0));
        let mid = interpolate(&a, &b, 0.5);
        assert!((mid.position.x - 5.0).abs() < 1e-12);
        assert!((mid.look_at.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn direction_between_coincident_points_uses_fallback() {
        let p = DVec3::new(1.0, 1.0, 1.0);
        assert_eq!(direction_or(p, p, DVec3::X), DVec3::X);
        assert_eq!(direction_or(p, p + DVec3::splat(1e-12), DVec3::Y), DVec3::Y);
    }

    #[test]
    fn direction_is_unit_length() {
        let d = direction_or(DVec3::ZERO, DVec3::new(0.0, 3.0, 4.0), DVec3::X);
        assert!((d.length() - 1.0).abs() < 1e-12);
        assert!((d.y - 0.6).abs() < 1e-12);
    }
}
