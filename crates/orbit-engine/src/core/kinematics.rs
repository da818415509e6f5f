//! Deterministic orbital motion and self-rotation as pure functions of
//! simulated time. Nothing here holds state; the clock supplies time and the
//! rotation blender supplies manual offsets.
//!
//! Uses f64 throughout: simulated time can reach millions of seconds at high
//! speed multipliers.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::api::config::{OrbitParams, SpinParams};

/// Wrap an angle into [0, 2π).
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Angle swept after `simulated_time` seconds at one revolution per `period`,
/// wrapped into [0, 2π).
#[inline]
pub fn phase(simulated_time: f64, period: f64) -> f64 {
    wrap_angle(simulated_time * (TAU / period))
}

/// Satellite position on a sphere of radius `radius` around the origin.
///
/// The height follows `inclination_amplitude · sin(angle / 2)` and the
/// in-plane radius shrinks to compensate, so the distance to the origin is
/// always exactly the orbit radius.
pub fn satellite_position(simulated_time: f64, orbit: &OrbitParams) -> DVec3 {
    let angle = phase(simulated_time, orbit.period);
    let y = orbit.inclination_amplitude * (angle * 0.5).sin();
    let planar = (orbit.radius * orbit.radius - y * y).max(0.0).sqrt();
    DVec3::new(planar * angle.cos(), y, planar * angle.sin())
}

/// Automatic yaw of the primary body, before manual offsets.
#[inline]
pub fn self_rotation(simulated_time: f64, spin: &SpinParams) -> f64 {
    phase(simulated_time, spin.self_rotation_period)
}

/// Automatic yaw of the dependent shell: the primary's rate scaled by
/// `shell_ratio`.
#[inline]
pub fn shell_rotation(simulated_time: f64, spin: &SpinParams) -> f64 {
    wrap_angle(simulated_time * (TAU / spin.self_rotation_period) * spin.shell_ratio)
}

/// Angle of the light source on its circle.
#[inline]
pub fn light_angle(simulated_time: f64, spin: &SpinParams) -> f64 {
    phase(simulated_time, spin.light_period)
}

/// Light source position on a horizontal circle of radius `light_radius`.
pub fn light_position(simulated_time: f64, spin: &SpinParams) -> DVec3 {
    let angle = light_angle(simulated_time, spin);
    DVec3::new(spin.light_radius * angle.cos(), 0.0, spin.light_radius * angle.sin())
}

/// Orientation and position of one body for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyState {
    pub position: DVec3,
    /// Pitch (radians).
    pub rotation_x: f64,
    /// Yaw (radians).
    pub rotation_y: f64,
}

/// Everything the kinematics produce for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KinematicsFrame {
    pub simulated_time: f64,
    pub primary: BodyState,
    /// Cloud layer: same pitch as the primary, faster yaw.
    pub shell: BodyState,
    pub satellite: BodyState,
    pub light_angle: f64,
    pub light_position: DVec3,
}

/// Recomputes the whole frame from simulated time plus the manual rotation
/// offsets `(pitch, yaw)` blended by the `RotationBlender`.
#[derive(Debug, Clone)]
pub struct OrbitalKinematics {
    orbit: OrbitParams,
    spin: SpinParams,
}

impl OrbitalKinematics {
    pub fn new(orbit: OrbitParams, spin: SpinParams) -> Self {
        Self { orbit, spin }
    }

    pub fn orbit(&self) -> &OrbitParams {
        &self.orbit
    }

    pub fn satellite_position(&self, simulated_time: f64) -> DVec3 {
        satellite_position(simulated_time, &self.orbit)
    }

    pub fn compute(&self, simulated_time: f64, manual: (f64, f64)) -> KinematicsFrame {
        let (manual_pitch, manual_yaw) = manual;
        let light_angle = light_angle(simulated_time, &self.spin);
        KinematicsFrame {
            simulated_time,
            primary: BodyState {
                position: DVec3::ZERO,
                rotation_x: wrap_angle(manual_pitch),
                rotation_y: wrap_angle(self_rotation(simulated_time, &self.spin) + manual_yaw),
            },
            shell: BodyState {
                position: DVec3::ZERO,
                rotation_x: wrap_angle(manual_pitch),
                rotation_y: wrap_angle(shell_rotation(simulated_time, &self.spin) + manual_yaw),
            },
            satellite: BodyState {
                position: self.satellite_position(simulated_time),
                ..BodyState::default()
            },
            light_angle,
            light_position: light_position(simulated_time, &self.spin),
        }
    }
}
