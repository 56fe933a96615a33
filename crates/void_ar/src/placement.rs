//! Surface classification and drag-plane geometry
//!
//! Hit-test poses carry the surface normal in their Y axis. The vertical
//! component of that normal (matrix element 5) decides whether a hit is a
//! floor, a wall, or neither. Drag planes only move when new evidence
//! differs from the current plane by more than a hysteresis threshold, so
//! noisy hit tests do not make the model jitter.

use glam::{Vec2, Vec3};
use void_math::Plane;
use void_xr::{HitPose, XrCamera};

use crate::config::ArConfig;

/// Offset change along a wall normal that moves the wall drag plane
pub const WALL_OFFSET_HYSTERESIS: f32 = 0.1;

/// Kind of surface a hit landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Floor,
    Wall,
}

/// Floor hits point (mostly) up
#[inline]
pub fn is_floor_hit(pose: &HitPose, floor_threshold: f32) -> bool {
    pose.up_component() >= floor_threshold
}

/// Wall hits are (mostly) vertical surfaces
#[inline]
pub fn is_wall_hit(pose: &HitPose, wall_threshold: f32) -> bool {
    pose.up_component().abs() <= wall_threshold
}

/// Classify a hit; slanted surfaces between the two thresholds are `None`.
pub fn classify_surface(pose: &HitPose, floor_threshold: f32, wall_threshold: f32) -> Option<SurfaceKind> {
    if is_floor_hit(pose, floor_threshold) {
        Some(SurfaceKind::Floor)
    } else if is_wall_hit(pose, wall_threshold) {
        Some(SurfaceKind::Wall)
    } else {
        None
    }
}

/// Classify with the thresholds from `config`
pub fn classify_with(pose: &HitPose, config: &ArConfig) -> Option<SurfaceKind> {
    classify_surface(pose, config.floor_threshold, config.wall_threshold)
}

/// Move a horizontal drag plane to `height` if it changed by at least
/// `threshold` in either direction. Returns whether the plane moved.
///
/// Lower floors are accepted too, otherwise a model dragged off a table
/// would stay pinned to the table height.
pub fn reposition_floor_plane(plane: &mut Plane, height: f32, threshold: f32) -> bool {
    let current = plane.height();
    if (height - current).abs() >= threshold {
        log::trace!("Floor plane moved {:.3} -> {:.3}", current, height);
        *plane = Plane::horizontal(height);
        true
    } else {
        log::trace!("Floor height {:.3} within hysteresis of {:.3}", height, current);
        false
    }
}

/// Move a wall drag plane onto the hit if its normal turned by at least
/// `angle_threshold` radians or the hit lies at least `offset_threshold`
/// off the current plane. Returns whether the plane moved.
pub fn reposition_wall_plane(
    plane: &mut Plane,
    pose: &HitPose,
    angle_threshold: f32,
    offset_threshold: f32,
) -> bool {
    let normal = pose.normal();
    if normal == Vec3::ZERO {
        return false;
    }

    let position = pose.position();
    let angle = plane.normal.angle_between(normal);
    let offset = plane.distance_to_point(position).abs();

    if angle >= angle_threshold || offset >= offset_threshold {
        log::trace!("Wall plane moved: angle {:.3} rad, offset {:.3}", angle, offset);
        *plane = Plane::from_point_normal(position, normal);
        true
    } else {
        false
    }
}

/// Intersect the camera ray through `ndc` with `plane`.
///
/// Returns `None` when the ray is parallel to the plane, the plane is
/// behind the camera, or the hit is farther than `max_distance`.
pub fn intersect_drag_plane(camera: &XrCamera, ndc: Vec2, plane: &Plane, max_distance: f32) -> Option<Vec3> {
    let ray = camera.ray(ndc);
    if !ray.is_valid() {
        return None;
    }

    let distance = plane.intersect_ray_distance(&ray)?;
    if distance > max_distance {
        log::trace!("Drag plane hit at {:.2} beyond {:.2}, ignored", distance, max_distance);
        return None;
    }
    Some(ray.at(distance))
}
