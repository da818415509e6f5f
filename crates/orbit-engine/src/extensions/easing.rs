// extensions/easing.rs
//
// Pure easing and interpolation functions for camera transitions.
// No dependencies on engine state, just math. Testable
// without a renderer or a scheduler.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Easing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end, fastest at the midpoint.
    #[default]
    QuadInOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Sine wave easing (smooth).
    SineInOut,
}

impl Easing {
    /// Apply the easing curve to `t`, clamped into [0, 1].
    /// Every curve maps 0 to 0 and 1 to 1 and stays inside [0, 1].
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => ease_in_out_quad(t),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Quadratic ease-in-out: `2p²` below the midpoint, `1 - 2(1-p)²` above.
#[inline]
pub fn ease_in_out_quad(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - 2.0 * (1.0 - p) * (1.0 - p)
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linearly interpolate between two points.
#[inline]
pub fn lerp_dvec3(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f64, b: f64, t: f64, easing: Easing) -> f64 {
    lerp(a, b, easing.apply(t))
}
