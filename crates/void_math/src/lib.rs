//! # void_math - AR Placement Geometry
//!
//! Small geometry layer on top of `glam` used by the AR placement code:
//! camera rays through touch points, drag planes, model bounds and the
//! easing curves that drive per-frame interpolation.

pub mod bounds;
pub mod easing;
pub mod plane;
pub mod ray;
pub mod transform;

pub use bounds::*;
pub use easing::*;
pub use plane::*;
pub use ray::*;
pub use transform::*;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const EPSILON: f32 = 1e-6;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp value between min and max
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Wrap `value` into `[min, max)`.
///
/// Infinite ranges leave the value untouched.
#[inline]
pub fn circulate(value: f32, min: f32, max: f32) -> f32 {
    let size = max - min;
    if !size.is_finite() || size <= 0.0 {
        return value;
    }
    let wrapped = (value - min).rem_euclid(size);
    min + wrapped
}

/// Signed angle (radians) swept from `from` to `to` around `center`.
///
/// The result is always the shorter arc, in `[-PI, PI]`, so a naive
/// difference of 350 degrees comes back as -10 degrees.
pub fn signed_angle_around(center: Vec2, from: Vec2, to: Vec2) -> f32 {
    let a = from - center;
    let b = to - center;
    let angle_from = a.y.atan2(a.x);
    let angle_to = b.y.atan2(b.x);

    let mut diff = angle_to - angle_from;
    if diff > consts::PI {
        diff -= consts::TAU;
    } else if diff < -consts::PI {
        diff += consts::TAU;
    }
    diff
}

pub mod prelude {
    pub use crate::bounds::{Aabb, Sphere};
    pub use crate::easing::Easing;
    pub use crate::plane::Plane;
    pub use crate::ray::Ray;
    pub use crate::transform::Transform;
    pub use crate::{circulate, clamp, lerp, signed_angle_around};
    pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
}
