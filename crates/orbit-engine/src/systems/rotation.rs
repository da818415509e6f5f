//! Keyboard-driven manual rotation, blended into the body orientation.
//!
//! Discrete presses move a target angle; every frame the current angle
//! closes a fixed fraction of the remaining gap (first-order low-pass
//! filter). The filter runs once per frame, independent of the simulation
//! speed multiplier.
//!
//! Targets are kept within half a turn of zero. When a target drifts past
//! that, it and the current angle shift by the same whole number of turns,
//! so the blend is unaffected.

use std::f64::consts::TAU;

use crate::api::config::RotationParams;

/// Smallest accepted ease rate. Zero would freeze the blend forever.
pub const MIN_EASE_RATE: f64 = 1e-3;

/// Rotation axis for manual input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Pitch (up/down arrows).
    X,
    /// Yaw (left/right arrows).
    Y,
}

#[derive(Debug, Clone)]
pub struct RotationBlender {
    target_x: f64,
    target_y: f64,
    current_x: f64,
    current_y: f64,
    step: f64,
    fast_step: f64,
    ease_rate: f64,
}

impl RotationBlender {
    pub fn new(params: &RotationParams) -> Self {
        let mut blender = Self {
            target_x: 0.0,
            target_y: 0.0,
            current_x: 0.0,
            current_y: 0.0,
            step: params.step,
            fast_step: params.fast_step,
            ease_rate: 1.0,
        };
        blender.set_ease_rate(params.ease_rate);
        blender
    }

    /// Clamp into `[MIN_EASE_RATE, 1]`.
    pub fn set_ease_rate(&mut self, rate: f64) {
        if rate.is_nan() {
            return;
        }
        self.ease_rate = rate.clamp(MIN_EASE_RATE, 1.0);
    }

    pub fn ease_rate(&self) -> f64 {
        self.ease_rate
    }

    /// Per-press magnitude for normal or fast input.
    pub fn step(&self, fast: bool) -> f64 {
        if fast { self.fast_step } else { self.step }
    }

    /// Add `magnitude` to the target on `axis`.
    pub fn apply_delta(&mut self, axis: Axis, magnitude: f64) {
        match axis {
            Axis::X => self.target_x += magnitude,
            Axis::Y => self.target_y += magnitude,
        }
    }

    /// Zero both targets. The current angles ease back over later ticks.
    pub fn reset(&mut self) {
        self.target_x = 0.0;
        self.target_y = 0.0;
    }

    /// Advance one frame and return `(current_x, current_y)`.
    pub fn tick(&mut self) -> (f64, f64) {
        recenter(&mut self.target_x, &mut self.current_x);
        recenter(&mut self.target_y, &mut self.current_y);
        self.current_x += (self.target_x - self.current_x) * self.ease_rate;
        self.current_y += (self.target_y - self.current_y) * self.ease_rate;
        (self.current_x, self.current_y)
    }

    pub fn current(&self) -> (f64, f64) {
        (self.current_x, self.current_y)
    }

    pub fn target(&self) -> (f64, f64) {
        (self.target_x, self.target_y)
    }
}

/// Shift `target` and `current` by whole turns so `target` is within
/// half a turn of zero.
fn recenter(target: &mut f64, current: &mut f64) {
    let turns = (*target / TAU).round();
    if turns != 0.0 {
        *target -= turns * TAU;
        *current -= turns * TAU;
    }
}
