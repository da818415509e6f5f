use glam::{DMat4, DVec2, DVec3};

use super::pose::{unit_or, CameraPose};
use crate::api::collaborators::CameraHandle;
use crate::systems::picking::Ray;

/// Perspective camera defined by a pose, vertical field of view and aspect.
/// A concrete `CameraHandle` for hosts that keep the camera on the Rust side.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: DVec3,
    pub target: DVec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Width / height.
    pub aspect: f64,
}

impl PerspectiveCamera {
    pub fn new(position: DVec3, target: DVec3, fov_y_degrees: f64, aspect: f64) -> Self {
        Self { position, target, fov_y_degrees, aspect }
    }

    pub fn from_pose(pose: CameraPose, fov_y_degrees: f64, aspect: f64) -> Self {
        Self::new(pose.position, pose.look_at, fov_y_degrees, aspect)
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    /// Orthonormal `(forward, right, up)` basis with world +Y as up.
    pub fn basis(&self) -> (DVec3, DVec3, DVec3) {
        let forward = unit_or(self.target - self.position, DVec3::NEG_Z);
        // Looking straight up or down: any horizontal right vector will do.
        let right = unit_or(forward.cross(DVec3::Y), DVec3::X);
        let up = right.cross(forward);
        (forward, right, up)
    }

    /// Right-handed view matrix for renderers that want one.
    pub fn view_matrix(&self) -> DMat4 {
        let (_, _, up) = self.basis();
        DMat4::look_at_rh(self.position, self.target, up)
    }
}

impl CameraHandle for PerspectiveCamera {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    fn look_at(&mut self, target: DVec3) {
        self.target = target;
    }

    fn pointer_ray(&self, ndc: DVec2) -> Ray {
        let (forward, right, up) = self.basis();
        let half_h = (self.fov_y_degrees.to_radians() * 0.5).tan();
        let half_w = half_h * self.aspect;
        let direction = forward + right * (ndc.x * half_w) + up * (ndc.y * half_h);
        Ray::new(self.position, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_target() {
        let cam = PerspectiveCamera::new(DVec3::new(3.0, 0.0, 0.0), DVec3::ZERO, 45.0, 1.5);
        let ray = cam.pointer_ray(DVec2::ZERO);
        assert!((ray.direction - DVec3::NEG_X).length() < 1e-12);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn top_edge_ray_is_half_fov_up() {
        let cam = PerspectiveCamera::new(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, 90.0, 1.0);
        let ray = cam.pointer_ray(DVec2::new(0.0, 1.0));
        // 90° vertical FOV: the top edge is 45° above the view axis.
        let expected = DVec3::new(0.0, 1.0, -1.0).normalize();
        assert!((ray.direction - expected).length() < 1e-12);
    }

    #[test]
    fn right_edge_respects_aspect() {
        let cam = PerspectiveCamera::new(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, 90.0, 2.0);
        let ray = cam.pointer_ray(DVec2::new(1.0, 0.0));
        let expected = DVec3::new(2.0, 0.0, -1.0).normalize();
        assert!((ray.direction - expected).length() < 1e-12);
    }

    #[test]
    fn vertical_view_has_finite_basis() {
        let cam = PerspectiveCamera::new(DVec3::new(0.0, 10.0, 0.0), DVec3::ZERO, 45.0, 1.0);
        let (f, r, u) = cam.basis();
        for v in [f, r, u] {
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn handle_writes_pose() {
        let mut cam = PerspectiveCamera::from_pose(CameraPose::default(), 45.0, 1.0);
        cam.set_position(DVec3::new(1.0, 2.0, 3.0));
        cam.look_at(DVec3::ONE);
        assert_eq!(cam.pose(), CameraPose::new(DVec3::new(1.0, 2.0, 3.0), DVec3::ONE));
    }
}
