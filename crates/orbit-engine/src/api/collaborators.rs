//! Capabilities the engine borrows from its host.
//!
//! The engine owns none of the rendering objects. The host hands it a camera
//! handle and a free-look controller at construction, and the engine writes
//! poses into them once per tick.

use glam::{DVec2, DVec3};

use crate::api::types::Body;
use crate::systems::picking::{PickTarget, Ray};

/// A mutable handle to the rendering camera.
pub trait CameraHandle {
    fn position(&self) -> DVec3;

    fn set_position(&mut self, position: DVec3);

    /// Orient the camera toward `target`.
    fn look_at(&mut self, target: DVec3);

    /// World-space ray through a pointer at normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    fn pointer_ray(&self, ndc: DVec2) -> Ray;
}

/// The external drag-orbit controller that owns the camera while the
/// engine is idle in free mode.
pub trait FreeLookController {
    /// Point the controller orbits around.
    fn target(&self) -> DVec3;

    fn set_target(&mut self, target: DVec3);

    /// Let the controller apply damping and pending drags to the camera.
    fn update(&mut self);
}

/// Ray-intersection query used to focus on clicked bodies.
pub trait RayPicker {
    /// The nearest body hit by a ray through `ndc`, if any.
    fn pick<C: CameraHandle>(&self, ndc: DVec2, camera: &C, targets: &[PickTarget]) -> Option<Body>;
}
