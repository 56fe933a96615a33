//! XR camera as seen by the placement code

use glam::{Mat4, Quat, Vec2, Vec3};
use void_math::Ray;

/// The XR camera for the current frame: world matrix plus projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XrCamera {
    /// Camera world matrix (camera-to-world)
    pub world: Mat4,
    /// Projection matrix
    pub projection: Mat4,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
}

impl XrCamera {
    pub fn new(world: Mat4, projection: Mat4, aspect: f32) -> Self {
        Self { world, projection, aspect }
    }

    /// Perspective camera at `position` with `rotation`
    pub fn perspective(position: Vec3, rotation: Quat, fov_y: f32, aspect: f32) -> Self {
        Self {
            world: Mat4::from_rotation_translation(rotation, position),
            projection: Mat4::perspective_rh(fov_y, aspect, 0.01, 100.0),
            aspect,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    pub fn orientation(&self) -> Quat {
        let (_, rotation, _) = self.world.to_scale_rotation_translation();
        rotation
    }

    /// Viewing direction (-Z of the camera) in world space
    pub fn forward(&self) -> Vec3 {
        self.world.transform_vector3(Vec3::NEG_Z).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.world.transform_vector3(Vec3::Y).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.world.transform_vector3(Vec3::X).normalize_or_zero()
    }

    /// Project a world-space point to normalized device coordinates
    pub fn project(&self, point: Vec3) -> Vec2 {
        let view_projection = self.projection * self.world.inverse();
        view_projection.project_point3(point).truncate()
    }

    /// Ray from the camera through a point in normalized device coordinates
    pub fn ray(&self, ndc: Vec2) -> Ray {
        Ray::from_camera(ndc, &self.world, &self.projection)
    }
}

impl Default for XrCamera {
    fn default() -> Self {
        Self::perspective(Vec3::ZERO, Quat::IDENTITY, 60f32.to_radians(), 1.0)
    }
}
