//! Maps raw input events to engine commands. The engine applies them.

use glam::DVec2;

use super::queue::{InputEvent, Key, Modifiers};
use crate::api::config::{RotationParams, SpeedParams};
use crate::camera::machine::{CameraMode, CameraRequest};
use crate::systems::rotation::Axis;

/// A state change requested by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Add to a manual rotation target.
    Rotate { axis: Axis, magnitude: f64 },
    /// Zero both manual rotation targets.
    ResetRotation,
    /// Multiply the speed multiplier.
    ScaleSpeed(f64),
    SetSpeed(f64),
    /// Back to real time.
    ResetSpeed,
    Camera(CameraRequest),
    /// Ray-cast from the pointer and focus on whatever it hits.
    Pick(DVec2),
}

#[derive(Debug, Clone)]
pub struct InteractionDispatcher {
    step: f64,
    fast_step: f64,
    speed_factor: f64,
}

impl InteractionDispatcher {
    pub fn new(rotation: &RotationParams, speed: &SpeedParams) -> Self {
        Self {
            step: rotation.step,
            fast_step: rotation.fast_step,
            speed_factor: speed.factor,
        }
    }

    pub fn map(&self, event: &InputEvent) -> Option<Command> {
        match *event {
            InputEvent::KeyDown { key, modifiers } => self.on_key(key, modifiers),
            InputEvent::Click { ndc } => Some(Command::Pick(ndc)),
            InputEvent::SelectMode(mode) => Some(Command::Camera(CameraRequest::Select(mode))),
            InputEvent::SetSpeed(multiplier) => Some(Command::SetSpeed(multiplier)),
        }
    }

    pub fn on_key(&self, key: Key, modifiers: Modifiers) -> Option<Command> {
        match key {
            Key::Digit(d) => {
                CameraMode::from_index(d as u32).map(|mode| Command::Camera(CameraRequest::Select(mode)))
            }
            Key::Home => Some(Command::Camera(CameraRequest::ResetView)),
            Key::ArrowUp => Some(self.arrow(Axis::X, 1.0, modifiers)),
            Key::ArrowDown => Some(self.arrow(Axis::X, -1.0, modifiers)),
            Key::ArrowLeft => Some(self.arrow(Axis::Y, -1.0, modifiers)),
            Key::ArrowRight => Some(self.arrow(Axis::Y, 1.0, modifiers)),
            Key::Char('+') | Key::Char('=') => Some(Command::ScaleSpeed(self.speed_factor)),
            Key::Char('-') | Key::Char('_') => Some(Command::ScaleSpeed(1.0 / self.speed_factor)),
            Key::Char('r') | Key::Char('R') => Some(Command::ResetSpeed),
            Key::Char(_) => None,
        }
    }

    fn arrow(&self, axis: Axis, sign: f64, modifiers: Modifiers) -> Command {
        if modifiers.alt {
            return Command::ResetRotation;
        }
        let step = if modifiers.fast() { self.fast_step } else { self.step };
        Command::Rotate { axis, magnitude: sign * step }
    }
}
