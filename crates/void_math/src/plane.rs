//! Planes used as drag surfaces
//!
//! A plane is stored as `normal · p + constant = 0`, so a horizontal floor
//! at height `h` has `normal = +Y` and `constant = -h`.

use glam::Vec3;

use crate::ray::Ray;

/// Plane in 3D space
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    /// Plane normal (unit vector)
    pub normal: Vec3,
    /// Signed offset from the origin along `-normal`
    pub constant: f32,
}

impl Plane {
    /// Create a new plane; the normal is normalized and the constant scaled
    /// to match.
    pub fn new(normal: Vec3, constant: f32) -> Self {
        let len = normal.length();
        if len > 1e-10 {
            Self {
                normal: normal / len,
                constant: constant / len,
            }
        } else {
            Self::default()
        }
    }

    /// Create a plane from a point on the plane and its normal
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            constant: -normal.dot(point),
        }
    }

    /// Horizontal plane at the given height
    pub fn horizontal(height: f32) -> Self {
        Self {
            normal: Vec3::Y,
            constant: -height,
        }
    }

    /// Height of a horizontal plane (meaningless for tilted planes)
    #[inline]
    pub fn height(&self) -> f32 {
        -self.constant
    }

    /// Signed distance from a point to the plane
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Closest point on the plane to a given point
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to_point(point)
    }

    /// Any point lying on the plane
    #[inline]
    pub fn coplanar_point(&self) -> Vec3 {
        self.normal * -self.constant
    }

    /// Distance along the ray to the plane, or `None` when the ray is
    /// parallel or the plane lies behind the ray origin.
    pub fn intersect_ray_distance(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-4 {
            return None;
        }

        let t = -(self.normal.dot(ray.origin) + self.constant) / denom;
        if t >= 0.0 { Some(t) } else { None }
    }

    /// Intersection point of the ray with the plane
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vec3> {
        self.intersect_ray_distance(ray).map(|t| ray.at(t))
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            constant: 0.0,
        }
    }
}
