// camera/transition.rs
//
// A single timed, eased camera-pose animation. Time is wall-clock
// milliseconds supplied by the host, never simulated time, so pausing the
// simulation does not pause a transition.

use super::pose::{interpolate, CameraPose};
use crate::extensions::easing::Easing;

/// One in-flight camera animation from `start` to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraAnimation {
    pub start: CameraPose,
    pub target: CameraPose,
    /// Host timestamp the animation began at.
    pub start_time_ms: f64,
    /// Zero or negative completes on the first sample.
    pub duration_ms: f64,
    pub easing: Easing,
    /// Highest progress sampled so far; keeps progress monotonic even if
    /// the host clock steps backwards.
    progress: f64,
}

impl CameraAnimation {
    pub fn new(
        start: CameraPose,
        target: CameraPose,
        start_time_ms: f64,
        duration_ms: f64,
        easing: Easing,
    ) -> Self {
        Self {
            start,
            target,
            start_time_ms,
            duration_ms,
            easing,
            progress: 0.0,
        }
    }

    /// Raw normalized progress at `now_ms`, clamped to [0, 1].
    pub fn progress_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let p = (now_ms - self.start_time_ms) / self.duration_ms;
        if p.is_nan() {
            return self.progress;
        }
        p.clamp(0.0, 1.0)
    }

    /// Last sampled progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Advance to `now_ms` and return the interpolated pose. Once progress
    /// reaches 1 the target pose is returned exactly.
    pub fn sample(&mut self, now_ms: f64) -> CameraPose {
        self.progress = self.progress.max(self.progress_at(now_ms));
        if self.is_complete() {
            self.target
        } else {
            interpolate(&self.start, &self.target, self.easing.apply(self.progress))
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn anim(duration_ms: f64) -> CameraAnimation {
        CameraAnimation::new(
            CameraPose::new(DVec3::new(3.0, 0.0, 0.0), DVec3::ZERO),
            CameraPose::new(DVec3::new(-5.0, 3.0, 1.0), DVec3::new(1.0, 0.5, 0.0)),
            1_000.0,
            duration_ms,
            Easing::QuadInOut,
        )
    }

    #[test]
    fn starts_at_start_and_ends_at_target() {
        let mut a = anim(2_000.0);
        assert_eq!(a.progress_at(1_000.0), 0.0);
        assert!(a.sample(1_000.0).distance(&a.start) < 1e-12);
        assert_eq!(a.progress_at(3_000.0), 1.0);
        assert_eq!(a.sample(3_000.0), a.target);
        assert!(a.is_complete());
    }

    #[test]
    fn midpoint_uses_easing() {
        let mut a = anim(2_000.0);
        let quarter = a.sample(1_500.0);
        // eased(0.25) = 0.125
        let expected = a.start.position + (a.target.position - a.start.position) * 0.125;
        assert!((quarter.position - expected).length() < 1e-12);
        assert!(!a.is_complete());
    }

    #[test]
    fn progress_is_clamped() {
        let a = anim(2_000.0);
        assert_eq!(a.progress_at(0.0), 0.0);
        assert_eq!(a.progress_at(1e9), 1.0);
    }

    #[test]
    fn progress_never_goes_backwards() {
        let mut a = anim(2_000.0);
        a.sample(2_000.0);
        assert!((a.progress() - 0.5).abs() < 1e-12);
        a.sample(1_200.0);
        assert!((a.progress() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        for d in [0.0, -10.0] {
            let mut a = anim(d);
            assert_eq!(a.sample(0.0), a.target);
            assert!(a.is_complete());
        }
    }
}
