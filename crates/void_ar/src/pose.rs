//! Orbit camera pose
//!
//! The non-AR viewer hands its orbit pose to the AR code when a session
//! starts and gets it back on exit; [`PoseAnimation`] eases between two
//! such poses with a [`Motion`].

use glam::Vec3;
use serde::{Deserialize, Serialize};
use void_math::{lerp, Easing};

use crate::motion::{Motion, Range};

/// Orbit pose around a pivot. A value snapshot; mutate a copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Radians around the vertical axis
    pub yaw: f32,
    /// Radians above the horizon
    pub pitch: f32,
    /// Distance from the pivot
    pub zoom: f32,
    pub pivot: Vec3,
}

impl Pose {
    pub fn new(yaw: f32, pitch: f32, zoom: f32, pivot: Vec3) -> Self {
        Self { yaw, pitch, zoom, pivot }
    }

    /// Component-wise interpolation
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            yaw: lerp(self.yaw, other.yaw, t),
            pitch: lerp(self.pitch, other.pitch, t),
            zoom: lerp(self.zoom, other.zoom, t),
            pivot: self.pivot.lerp(other.pivot, t),
        }
    }

    /// Camera position for this pose
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.pivot + Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.zoom
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, Vec3::ZERO)
    }
}

/// Eased transition between two orbit poses
#[derive(Debug, Clone)]
pub struct PoseAnimation {
    from: Pose,
    to: Pose,
    motion: Motion,
}

impl PoseAnimation {
    pub fn new(from: Pose, to: Pose, duration_ms: f32) -> Self {
        let mut motion = Motion::new(duration_ms)
            .with_range(Range::UNIT)
            .with_easing(Easing::EaseInOutCubic);
        motion.reset(0.0);
        motion.set_end_delta(1.0);
        Self { from, to, motion }
    }

    /// Advance and return the current pose
    pub fn update(&mut self, delta_ms: f32) -> Pose {
        self.motion.update(delta_ms);
        self.current()
    }

    pub fn current(&self) -> Pose {
        self.from.lerp(&self.to, self.motion.val())
    }

    pub fn is_finished(&self) -> bool {
        !self.motion.is_activated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pose_is_a_value() {
        let pose = Pose::default();
        let mut copy = pose;
        copy.yaw = 1.0;
        assert_eq!(pose.yaw, 0.0);
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = Pose::new(0.0, 0.0, 1.0, Vec3::ZERO);
        let b = Pose::new(1.0, 0.5, 3.0, Vec3::new(2.0, 0.0, 0.0));
        let mid = a.lerp(&b, 0.5);
        assert_relative_eq!(mid.yaw, 0.5);
        assert_relative_eq!(mid.pitch, 0.25);
        assert_relative_eq!(mid.zoom, 2.0);
        assert_relative_eq!(mid.pivot.x, 1.0);
    }

    #[test]
    fn test_eye_position() {
        let eye = Pose::new(0.0, 0.0, 2.0, Vec3::Y).eye();
        assert_relative_eq!(eye.z, 2.0, epsilon = 1e-6);
        assert_relative_eq!(eye.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_animation_reaches_target() {
        let from = Pose::default();
        let to = Pose::new(1.0, 0.2, 4.0, Vec3::ZERO);
        let mut animation = PoseAnimation::new(from, to, 200.0);

        let halfway = animation.update(100.0);
        assert!(halfway.zoom > 1.0 && halfway.zoom < 4.0);
        assert!(!animation.is_finished());

        let end = animation.update(200.0);
        assert_eq!(end, to);
        assert!(animation.is_finished());
    }
}
