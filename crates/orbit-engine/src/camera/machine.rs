//! Camera mode state machine and timed pose transitions.
//!
//! The machine is pure: it receives wall-clock time and body positions, and
//! returns a `CameraDirective` telling the engine what to write to the host
//! camera. It never touches the camera handle itself.

use glam::DVec3;

use super::pose::{direction_or, unit_or, CameraPose};
use super::transition::CameraAnimation;
use crate::api::config::{CameraParams, ModeRule};
use crate::api::types::{Body, BodyPositions};

/// Named camera modes. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Free-look: the external orbit controller owns the camera when idle.
    #[default]
    Free,
    /// Behind and above the primary, framing its horizon and the satellite.
    FocusPrimary,
    /// Behind and above the satellite, looking back toward the primary.
    FocusSatellite,
}

impl CameraMode {
    /// Stable numeric id, used by the key map and the frame snapshot.
    pub fn index(self) -> u32 {
        match self {
            CameraMode::Free => 0,
            CameraMode::FocusPrimary => 1,
            CameraMode::FocusSatellite => 2,
        }
    }

    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(CameraMode::Free),
            1 => Some(CameraMode::FocusPrimary),
            2 => Some(CameraMode::FocusSatellite),
            _ => None,
        }
    }

    /// Transition table: the mode after `request`, and whether a new
    /// animation starts.
    pub fn on(self, request: CameraRequest) -> Transition {
        match request {
            CameraRequest::Select(mode) if mode == self => Transition { mode: self, animate: false },
            CameraRequest::Select(mode) => Transition { mode, animate: true },
            // Focus clicks are one-shot, not sticky modes.
            CameraRequest::FocusClick(_) => Transition { mode: CameraMode::Free, animate: true },
            CameraRequest::ResetView => Transition { mode: CameraMode::Free, animate: true },
        }
    }
}

/// Something that asks the camera to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraRequest {
    /// Switch to a named mode. No-op when already in that mode.
    Select(CameraMode),
    /// Fly to a clicked body, then stay in `Free`.
    FocusClick(Body),
    /// Fly back to the default free pose, even from `Free`.
    ResetView,
}

/// Result of looking a request up in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub mode: CameraMode,
    pub animate: bool,
}

/// What the engine should do with the host camera this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraDirective {
    /// A transition is in flight; write this interpolated pose.
    Animate(CameraPose),
    /// A focus mode is tracking moving bodies; snap to this pose.
    Track(CameraPose),
    /// Free mode and idle; let the free-look controller drive.
    Yield,
}

#[derive(Debug, Clone)]
pub struct CameraTransitionMachine {
    params: CameraParams,
    mode: CameraMode,
    animation: Option<CameraAnimation>,
    /// Pose most recently handed out by this machine.
    last_pose: CameraPose,
}

impl CameraTransitionMachine {
    pub fn new(params: CameraParams) -> Self {
        Self {
            last_pose: params.free_pose,
            params,
            mode: CameraMode::Free,
            animation: None,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&CameraAnimation> {
        self.animation.as_ref()
    }

    pub fn last_pose(&self) -> CameraPose {
        self.last_pose
    }

    /// Target pose for `mode` given the current body positions.
    pub fn mode_pose(&self, mode: CameraMode, bodies: &BodyPositions) -> CameraPose {
        match mode {
            CameraMode::Free => self.params.free_pose,
            CameraMode::FocusPrimary => {
                rule_pose(&self.params.focus_primary, bodies.primary, bodies.satellite)
            }
            CameraMode::FocusSatellite => {
                rule_pose(&self.params.focus_satellite, bodies.satellite, bodies.primary)
            }
        }
    }

    /// Target pose after clicking `body`. For the primary the camera keeps
    /// its current bearing; for the satellite it sits on the primary's side.
    pub fn click_pose(&self, body: Body, bodies: &BodyPositions, camera_position: DVec3) -> CameraPose {
        match body {
            Body::Primary => {
                let s = &self.params.click_primary;
                let bearing = direction_or(bodies.primary, camera_position, DVec3::X);
                CameraPose::new(
                    bodies.primary + bearing * s.distance + DVec3::Y * s.elevation,
                    bodies.primary,
                )
            }
            Body::Satellite => {
                let s = &self.params.click_satellite;
                let outward = unit_or(bodies.satellite - bodies.primary, DVec3::X);
                CameraPose::new(
                    bodies.satellite - outward * s.distance + DVec3::Y * s.elevation,
                    bodies.satellite,
                )
            }
        }
    }

    /// Apply `request` at `now_ms`. `current` is the host camera's pose,
    /// used as the start pose when no animation is in flight. Returns true
    /// when a new animation started.
    pub fn request(
        &mut self,
        request: CameraRequest,
        now_ms: f64,
        bodies: &BodyPositions,
        current: CameraPose,
    ) -> bool {
        let transition = self.mode.on(request);
        if !transition.animate {
            return false;
        }

        let target = match request {
            CameraRequest::Select(mode) => self.mode_pose(mode, bodies),
            CameraRequest::FocusClick(body) => self.click_pose(body, bodies, current.position),
            CameraRequest::ResetView => self.params.free_pose,
        };

        // Overwrite semantics: an in-flight animation hands over the pose it
        // last produced, so the camera never jumps.
        let start = if self.animation.is_some() { self.last_pose } else { current };
        if transition.mode != self.mode {
            log::info!("camera mode {:?} -> {:?}", self.mode, transition.mode);
        }
        self.mode = transition.mode;
        self.animation = Some(CameraAnimation::new(
            start,
            target,
            now_ms,
            self.params.transition_ms,
            self.params.easing,
        ));
        self.last_pose = start;
        true
    }

    pub fn select_mode(
        &mut self,
        mode: CameraMode,
        now_ms: f64,
        bodies: &BodyPositions,
        current: CameraPose,
    ) -> bool {
        self.request(CameraRequest::Select(mode), now_ms, bodies, current)
    }

    pub fn focus_on_click(
        &mut self,
        body: Body,
        now_ms: f64,
        bodies: &BodyPositions,
        current: CameraPose,
    ) -> bool {
        self.request(CameraRequest::FocusClick(body), now_ms, bodies, current)
    }

    /// Advance any in-flight animation, or track the active focus mode.
    pub fn tick(&mut self, now_ms: f64, bodies: &BodyPositions) -> CameraDirective {
        if let Some(animation) = &mut self.animation {
            let pose = animation.sample(now_ms);
            self.last_pose = pose;
            if animation.is_complete() {
                log::trace!("camera transition complete in {:?}", self.mode);
                self.animation = None;
            }
            return CameraDirective::Animate(pose);
        }

        match self.mode {
            CameraMode::Free => CameraDirective::Yield,
            mode => {
                let pose = self.mode_pose(mode, bodies);
                self.last_pose = pose;
                CameraDirective::Track(pose)
            }
        }
    }
}

/// Camera behind `anchor` on the side away from `other`, raised, looking at
/// a blend of both positions.
fn rule_pose(rule: &ModeRule, anchor: DVec3, other: DVec3) -> CameraPose {
    let toward_other = direction_or(anchor, other, DVec3::X);
    CameraPose::new(
        anchor - toward_other * rule.back_distance + DVec3::Y * rule.elevation,
        (anchor + other) * rule.look_at_blend,
    )
}
