use glam::DVec3;
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::error::ConfigError;
use crate::camera::pose::CameraPose;
use crate::extensions::easing::Easing;

/// Engine configuration. Every field has a default, so a host can load a
/// partial JSON document and only override what it cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub orbit: OrbitParams,
    pub spin: SpinParams,
    pub rotation: RotationParams,
    pub speed: SpeedParams,
    pub camera: CameraParams,
    pub bodies: BodyParams,
}

/// Satellite orbit around the primary body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitParams {
    /// Distance from the primary's center, in primary radii.
    pub radius: f64,
    /// Seconds of simulated time per revolution.
    pub period: f64,
    /// Peak height above the orbital plane. Must not exceed `radius`.
    pub inclination_amplitude: f64,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            radius: 12.0,
            // 27.3 days
            period: 2_358_720.0,
            inclination_amplitude: 2.0,
        }
    }
}

/// Self-rotation of the primary, its cloud shell, and the light source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinParams {
    /// Seconds of simulated time per primary rotation.
    pub self_rotation_period: f64,
    /// Shell rotation rate relative to the primary.
    pub shell_ratio: f64,
    /// Seconds of simulated time per revolution of the light source.
    pub light_period: f64,
    /// Radius of the circle the directional light sits on.
    pub light_radius: f64,
}

impl Default for SpinParams {
    fn default() -> Self {
        Self {
            self_rotation_period: 86_400.0,
            shell_ratio: 1.1,
            light_period: 86_400.0,
            light_radius: 10.0,
        }
    }
}

/// Keyboard-driven manual rotation of the primary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationParams {
    /// Radians added to the target per arrow press.
    pub step: f64,
    /// Radians per press with Shift/Ctrl/Meta held.
    pub fast_step: f64,
    /// Fraction of the remaining gap closed per frame, in (0, 1].
    pub ease_rate: f64,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            step: 0.02,
            fast_step: 0.05,
            ease_rate: 0.1,
        }
    }
}

/// Simulation speed multiplier bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedParams {
    pub min: f64,
    pub max: f64,
    /// Multiplicative step for the `+` / `-` keys.
    pub factor: f64,
}

impl Default for SpeedParams {
    fn default() -> Self {
        Self {
            min: 0.01,
            max: 100.0,
            factor: 1.5,
        }
    }
}

/// Where a focus mode places the camera relative to the two bodies.
///
/// The camera sits `back_distance` behind the anchor body, away from the
/// other body, raised by `elevation`. It looks at `look_at_blend` times the
/// sum of both body positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeRule {
    pub back_distance: f64,
    pub elevation: f64,
    pub look_at_blend: f64,
}

/// Camera placement after clicking a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standoff {
    pub distance: f64,
    pub elevation: f64,
}

// The rule defaults differ per camera field, so a partial JSON rule is
// read as a patch and laid over that field's own default.

#[derive(Default, Deserialize)]
#[serde(default)]
struct ModeRulePatch {
    back_distance: Option<f64>,
    elevation: Option<f64>,
    look_at_blend: Option<f64>,
}

impl ModeRule {
    fn patched(self, patch: ModeRulePatch) -> Self {
        Self {
            back_distance: patch.back_distance.unwrap_or(self.back_distance),
            elevation: patch.elevation.unwrap_or(self.elevation),
            look_at_blend: patch.look_at_blend.unwrap_or(self.look_at_blend),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct StandoffPatch {
    distance: Option<f64>,
    elevation: Option<f64>,
}

impl Standoff {
    fn patched(self, patch: StandoffPatch) -> Self {
        Self {
            distance: patch.distance.unwrap_or(self.distance),
            elevation: patch.elevation.unwrap_or(self.elevation),
        }
    }
}

fn focus_primary_rule<'de, D: Deserializer<'de>>(d: D) -> Result<ModeRule, D::Error> {
    Ok(CameraParams::default().focus_primary.patched(ModeRulePatch::deserialize(d)?))
}

fn focus_satellite_rule<'de, D: Deserializer<'de>>(d: D) -> Result<ModeRule, D::Error> {
    Ok(CameraParams::default().focus_satellite.patched(ModeRulePatch::deserialize(d)?))
}

fn click_primary_standoff<'de, D: Deserializer<'de>>(d: D) -> Result<Standoff, D::Error> {
    Ok(CameraParams::default().click_primary.patched(StandoffPatch::deserialize(d)?))
}

fn click_satellite_standoff<'de, D: Deserializer<'de>>(d: D) -> Result<Standoff, D::Error> {
    Ok(CameraParams::default().click_satellite.patched(StandoffPatch::deserialize(d)?))
}

/// Camera transitions, mode rules, and projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Wall-clock length of a transition. Zero or less completes instantly.
    pub transition_ms: f64,
    pub easing: Easing,
    /// Pose for `CameraMode::Free` and the initial camera.
    pub free_pose: CameraPose,
    #[serde(deserialize_with = "focus_primary_rule")]
    pub focus_primary: ModeRule,
    #[serde(deserialize_with = "focus_satellite_rule")]
    pub focus_satellite: ModeRule,
    #[serde(deserialize_with = "click_primary_standoff")]
    pub click_primary: Standoff,
    #[serde(deserialize_with = "click_satellite_standoff")]
    pub click_satellite: Standoff,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Viewport width / height.
    pub aspect: f64,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            transition_ms: 2000.0,
            easing: Easing::QuadInOut,
            free_pose: CameraPose::new(DVec3::new(3.0, 0.0, 0.0), DVec3::ZERO),
            focus_primary: ModeRule { back_distance: 8.0, elevation: 3.0, look_at_blend: 0.3 },
            focus_satellite: ModeRule { back_distance: 3.0, elevation: 1.0, look_at_blend: 0.3 },
            click_primary: Standoff { distance: 3.0, elevation: 1.0 },
            click_satellite: Standoff { distance: 2.0, elevation: 0.0 },
            fov_y_degrees: 45.0,
            aspect: 16.0 / 9.0,
        }
    }
}

/// Pick radii for the focusable bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyParams {
    pub primary_radius: f64,
    pub satellite_radius: f64,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            primary_radius: 1.0,
            // 1737 km / 6371 km
            satellite_radius: 0.2727,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every invariant the engine relies on at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("orbit.radius", self.orbit.radius)?;
        positive("orbit.period", self.orbit.period)?;
        non_negative("orbit.inclination_amplitude", self.orbit.inclination_amplitude)?;
        if self.orbit.inclination_amplitude > self.orbit.radius {
            return Err(ConfigError::InclinationExceedsRadius {
                amplitude: self.orbit.inclination_amplitude,
                radius: self.orbit.radius,
            });
        }

        positive("spin.self_rotation_period", self.spin.self_rotation_period)?;
        finite("spin.shell_ratio", self.spin.shell_ratio)?;
        positive("spin.light_period", self.spin.light_period)?;
        non_negative("spin.light_radius", self.spin.light_radius)?;

        finite("rotation.step", self.rotation.step)?;
        finite("rotation.fast_step", self.rotation.fast_step)?;
        finite("rotation.ease_rate", self.rotation.ease_rate)?;

        non_negative("speed.min", self.speed.min)?;
        finite("speed.max", self.speed.max)?;
        if self.speed.min > self.speed.max {
            return Err(ConfigError::SpeedRange { min: self.speed.min, max: self.speed.max });
        }
        finite("speed.factor", self.speed.factor)?;
        if self.speed.factor <= 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "speed.factor",
                value: self.speed.factor,
                expected: "greater than 1",
            });
        }

        finite("camera.transition_ms", self.camera.transition_ms)?;
        let pose = &self.camera.free_pose;
        if !pose.position.is_finite() || !pose.look_at.is_finite() {
            return Err(ConfigError::NonFinite { field: "camera.free_pose" });
        }
        for (field, rule) in [
            ("camera.focus_primary", &self.camera.focus_primary),
            ("camera.focus_satellite", &self.camera.focus_satellite),
        ] {
            for v in [rule.back_distance, rule.elevation, rule.look_at_blend] {
                finite(field, v)?;
            }
        }
        for (field, standoff) in [
            ("camera.click_primary", &self.camera.click_primary),
            ("camera.click_satellite", &self.camera.click_satellite),
        ] {
            finite(field, standoff.distance)?;
            finite(field, standoff.elevation)?;
        }
        if !(self.camera.fov_y_degrees > 0.0 && self.camera.fov_y_degrees < 180.0) {
            return Err(ConfigError::OutOfRange {
                field: "camera.fov_y_degrees",
                value: self.camera.fov_y_degrees,
                expected: "between 0 and 180",
            });
        }
        positive("camera.aspect", self.camera.aspect)?;

        positive("bodies.primary_radius", self.bodies.primary_radius)?;
        positive("bodies.satellite_radius", self.bodies.satellite_radius)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, expected: "greater than 0" })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, expected: "at least 0" })
    }
}
