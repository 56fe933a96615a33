//! Per-frame render context and the placed model

use glam::{Mat4, Quat, Vec2, Vec3};
use void_math::{Aabb, Ray, Sphere, Transform};
use void_xr::{HitPose, XrCamera, XrFrame};

/// Screen size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1 for degenerate sizes
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Express a normalized screen point in units of the longer screen side.
///
/// Normalized coordinates span `[-1, 1]` on both axes whatever the screen
/// shape, so the axis along the shorter side is scaled down by the aspect
/// ratio. Distances and angles measured afterwards are the same in every
/// direction on the glass.
pub fn aspect_corrected(point: Vec2, aspect: f32) -> Vec2 {
    if aspect > 1.0 {
        Vec2::new(point.x, point.y / aspect)
    } else {
        Vec2::new(point.x * aspect, point.y)
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// The model being placed, as seen by the AR code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArModel {
    /// World transform
    pub transform: Transform,
    /// Bounding box in model space
    pub local_bounds: Aabb,
}

impl ArModel {
    pub fn new(transform: Transform, local_bounds: Aabb) -> Self {
        Self { transform, local_bounds }
    }

    #[inline]
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// Bounding box in world space
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds.transform(&self.world_matrix())
    }

    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::from_aabb(&self.world_bounds())
    }

    /// Whether a ray hits the model's world bounding box
    pub fn is_hit_by(&self, ray: &Ray) -> bool {
        self.world_bounds().intersect_ray(ray).is_some()
    }
}

impl Default for ArModel {
    fn default() -> Self {
        Self::new(
            Transform::IDENTITY,
            Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5)),
        )
    }
}

/// Everything a controller may touch during one XR frame.
///
/// Rebuilt by the caller every frame; controllers only borrow it.
pub struct XrRenderContext<'a> {
    pub model: &'a mut ArModel,
    pub camera: &'a XrCamera,
    pub frame: &'a XrFrame,
    pub size: ScreenSize,
    pub delta_ms: f32,
}

impl<'a> XrRenderContext<'a> {
    pub fn new(
        model: &'a mut ArModel,
        camera: &'a XrCamera,
        frame: &'a XrFrame,
        size: ScreenSize,
        delta_ms: f32,
    ) -> Self {
        Self {
            model,
            camera,
            frame,
            size,
            delta_ms,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.size.aspect()
    }

    /// Input for controllers, taken from this frame's transient hits
    pub fn control_input(&self) -> ControlInput {
        ControlInput::from_frame(self.frame)
    }
}

/// Input handed to [`ArControl::process`](crate::control::ArControl::process)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlInput {
    /// Touch points in normalized device coordinates, no aspect correction
    pub coords: Vec<Vec2>,
    /// First resolved surface hit under the first finger
    pub hit_pose: Option<HitPose>,
}

impl ControlInput {
    pub fn new(coords: Vec<Vec2>, hit_pose: Option<HitPose>) -> Self {
        Self { coords, hit_pose }
    }

    pub fn from_frame(frame: &XrFrame) -> Self {
        Self {
            coords: frame.input_coords(),
            hit_pose: frame.transient_hit_pose(),
        }
    }

    #[inline]
    pub fn finger_count(&self) -> usize {
        self.coords.len()
    }

    /// Midpoint of the first two fingers, or the first finger alone
    pub fn center(&self) -> Option<Vec2> {
        match self.coords.as_slice() {
            [] => None,
            [only] => Some(*only),
            [a, b, ..] => Some((*a + *b) * 0.5),
        }
    }
}

/// Rotation that lays the model's up axis along `normal`
pub fn align_up(normal: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::Y, normal.normalize_or_zero())
}
