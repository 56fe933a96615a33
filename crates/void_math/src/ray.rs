//! 3D Ray for placement raycasts
//!
//! Rays are cast from the XR camera through a touch point and tested
//! against drag planes and model bounds.

use glam::{Mat4, Vec2, Vec3};

/// 3D ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with normalized direction
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Cast a ray from a perspective camera through a point in normalized
    /// device coordinates (`x`, `y` in `[-1, 1]`, `y` up).
    ///
    /// `camera_world` is the camera's world matrix, `projection` its
    /// projection matrix.
    pub fn from_camera(ndc: Vec2, camera_world: &Mat4, projection: &Mat4) -> Self {
        let origin = camera_world.w_axis.truncate();
        let unproject = *camera_world * projection.inverse();
        let target = unproject.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Self::new(origin, target - origin)
    }

    /// Get a point at distance t along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Check if the ray direction is valid (non-zero length)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.direction.length_squared() > 1e-10
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_direction_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(ray.direction.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(ray.at(5.0).z, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_center_ray_follows_camera_forward() {
        let camera = Mat4::from_translation(Vec3::new(0.0, 1.5, 0.0));
        let projection = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.01, 100.0);

        let ray = Ray::from_camera(Vec2::ZERO, &camera, &projection);
        assert_relative_eq!(ray.origin.y, 1.5, epsilon = 1e-5);
        assert_relative_eq!(ray.direction.z, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_offset_ray_tilts_toward_touch() {
        let camera = Mat4::IDENTITY;
        let projection = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.01, 100.0);

        let ray = Ray::from_camera(Vec2::new(0.0, -0.5), &camera, &projection);
        assert!(ray.direction.y < 0.0);
        assert!(ray.direction.z < 0.0);
    }
}
