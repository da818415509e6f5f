//! Pointer picking: rays against bounding spheres.

use glam::{DVec2, DVec3};

use crate::api::collaborators::{CameraHandle, RayPicker};
use crate::api::types::Body;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction: direction.normalize_or(DVec3::NEG_Z) }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first intersection with a sphere, or
    /// `None` when the sphere is missed or entirely behind the origin.
    pub fn intersect_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere.
        let far = -b + sqrt_d;
        (far >= 0.0).then_some(far)
    }
}

/// A body as seen by the picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    pub body: Body,
    pub center: DVec3,
    pub radius: f64,
}

/// Default picker: bounding-sphere test, nearest hit wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpherePicker;

impl RayPicker for SpherePicker {
    fn pick<C: CameraHandle>(&self, ndc: DVec2, camera: &C, targets: &[PickTarget]) -> Option<Body> {
        let ray = camera.pointer_ray(ndc);
        targets
            .iter()
            .filter_map(|t| ray.intersect_sphere(t.center, t.radius).map(|d| (t.body, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(body, _)| body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::perspective::PerspectiveCamera;

    #[test]
    fn ray_hits_sphere_in_front() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z);
        let t = ray.intersect_sphere(DVec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-12);
        assert!((ray.at(t) - DVec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn ray_misses_sphere_behind() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::Z);
        assert_eq!(ray.intersect_sphere(DVec3::ZERO, 1.0), None);
    }

    #[test]
    fn ray_misses_offset_sphere() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z);
        assert_eq!(ray.intersect_sphere(DVec3::new(3.0, 0.0, 0.0), 1.0), None);
    }

    #[test]
    fn ray_from_inside_hits_far_side() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        let t = ray.intersect_sphere(DVec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn nearest_body_wins() {
        let camera = PerspectiveCamera::new(DVec3::new(0.0, 0.0, 20.0), DVec3::ZERO, 45.0, 1.0);
        let targets = [
            PickTarget { body: Body::Primary, center: DVec3::ZERO, radius: 1.0 },
            PickTarget { body: Body::Satellite, center: DVec3::new(0.0, 0.0, 5.0), radius: 0.5 },
        ];
        assert_eq!(SpherePicker.pick(DVec2::ZERO, &camera, &targets), Some(Body::Satellite));
    }

    #[test]
    fn empty_space_is_no_hit() {
        let camera = PerspectiveCamera::new(DVec3::new(0.0, 0.0, 20.0), DVec3::ZERO, 45.0, 1.0);
        let targets = [PickTarget { body: Body::Primary, center: DVec3::ZERO, radius: 1.0 }];
        assert_eq!(SpherePicker.pick(DVec2::new(0.9, 0.9), &camera, &targets), None);
    }
}
