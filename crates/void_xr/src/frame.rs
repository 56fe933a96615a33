//! Per-frame XR data
//!
//! An [`XrFrame`] is a plain snapshot of what the platform reported for one
//! display refresh: the viewer pose, the viewer hit-test results and the
//! hit-test results for every transient (touch) input. It is rebuilt every
//! frame and never kept around.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::Pose;

/// Pose of a hit-test result, relative to the session reference space.
///
/// The pose's local Y axis points along the surface normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitPose {
    /// Column-major transform matrix
    pub matrix: Mat4,
}

impl HitPose {
    pub fn new(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Build a hit pose from a surface point and its normal
    pub fn from_position_normal(position: Vec3, normal: Vec3) -> Self {
        let rotation = Quat::from_rotation_arc(Vec3::Y, normal.normalize_or_zero());
        Self {
            matrix: Mat4::from_rotation_translation(rotation, position),
        }
    }

    /// Build a hit pose from a raw column-major matrix array
    pub fn from_cols_array(matrix: &[f32; 16]) -> Self {
        Self {
            matrix: Mat4::from_cols_array(matrix),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    pub fn orientation(&self) -> Quat {
        let (_, rotation, _) = self.matrix.to_scale_rotation_translation();
        rotation
    }

    /// Vertical component of the surface normal (matrix element 5).
    ///
    /// Close to 1 for floors, close to 0 for walls.
    #[inline]
    pub fn up_component(&self) -> f32 {
        self.matrix.y_axis.y
    }

    /// Surface normal in reference space
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.matrix.y_axis.truncate().normalize_or_zero()
    }
}

/// Single hit-test result. The pose is `None` when the platform could not
/// resolve it against the reference space this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitTestResult {
    pub pose: Option<HitPose>,
}

impl HitTestResult {
    pub fn new(pose: HitPose) -> Self {
        Self { pose: Some(pose) }
    }

    /// A result whose pose could not be resolved
    pub fn unresolved() -> Self {
        Self { pose: None }
    }
}

/// A transient (screen touch) input source
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransientInput {
    /// Gamepad axes: `x` left to right, `y` top to bottom, both in `[-1, 1]`
    pub axes: Vec2,
}

impl TransientInput {
    pub fn new(x: f32, y: f32) -> Self {
        Self { axes: Vec2::new(x, y) }
    }

    /// Touch position in normalized device coordinates (`y` up)
    #[inline]
    pub fn ndc(&self) -> Vec2 {
        Vec2::new(self.axes.x, -self.axes.y)
    }
}

/// Hit-test results for one transient input
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransientHitTestResult {
    pub input: TransientInput,
    pub results: Vec<HitTestResult>,
}

impl TransientHitTestResult {
    pub fn new(input: TransientInput, results: Vec<HitTestResult>) -> Self {
        Self { input, results }
    }

    /// First resolved pose, if any
    pub fn first_pose(&self) -> Option<HitPose> {
        self.results.iter().find_map(|result| result.pose)
    }
}

/// Snapshot of one XR frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XrFrame {
    /// Time of the frame in milliseconds
    pub timestamp_ms: f64,
    /// Viewer pose, when tracking is available
    pub viewer_pose: Option<Pose>,
    /// Results of the viewer-space (screen center) hit-test source
    pub viewer_hits: Vec<HitTestResult>,
    /// Results of the transient input hit-test source, one per touch
    pub transient_hits: Vec<TransientHitTestResult>,
}

impl XrFrame {
    pub fn new(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            ..Default::default()
        }
    }

    /// Attach a viewer hit result (builder pattern)
    pub fn with_viewer_hit(mut self, pose: HitPose) -> Self {
        self.viewer_hits.push(HitTestResult::new(pose));
        self
    }

    /// Attach a transient input with its hit results (builder pattern)
    pub fn with_touch(mut self, input: TransientInput, pose: Option<HitPose>) -> Self {
        let results = match pose {
            Some(pose) => vec![HitTestResult::new(pose)],
            None => Vec::new(),
        };
        self.transient_hits.push(TransientHitTestResult::new(input, results));
        self
    }

    /// First resolved viewer hit pose
    pub fn viewer_hit_pose(&self) -> Option<HitPose> {
        self.viewer_hits.iter().find_map(|result| result.pose)
    }

    /// First resolved pose for the first transient input
    pub fn transient_hit_pose(&self) -> Option<HitPose> {
        self.transient_hits.first().and_then(|hit| hit.first_pose())
    }

    /// Active touch points in normalized device coordinates
    pub fn input_coords(&self) -> Vec<Vec2> {
        self.transient_hits.iter().map(|hit| hit.input.ndc()).collect()
    }

    /// Number of fingers currently on screen
    #[inline]
    pub fn finger_count(&self) -> usize {
        self.transient_hits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_up_component_is_matrix_element_five() {
        let mut raw = Mat4::IDENTITY.to_cols_array();
        raw[5] = 0.9;
        let pose = HitPose::from_cols_array(&raw);
        assert_relative_eq!(pose.up_component(), 0.9);
    }

    #[test]
    fn test_pose_from_wall_normal() {
        let pose = HitPose::from_position_normal(Vec3::new(0.0, 1.0, -2.0), Vec3::Z);
        assert_relative_eq!(pose.up_component(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(pose.normal().z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(pose.position().z, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_touch_coords_flip_y() {
        let frame = XrFrame::new(0.0)
            .with_touch(TransientInput::new(0.5, 0.25), None)
            .with_touch(TransientInput::new(-0.5, -0.25), None);

        let coords = frame.input_coords();
        assert_eq!(frame.finger_count(), 2);
        assert_eq!(coords[0], Vec2::new(0.5, -0.25));
        assert_eq!(coords[1], Vec2::new(-0.5, 0.25));
        assert!(frame.transient_hit_pose().is_none());
    }

    #[test]
    fn test_unresolved_results_are_skipped() {
        let floor = HitPose::from_position_normal(Vec3::new(0.0, 0.0, -1.5), Vec3::Y);
        let mut frame = XrFrame::new(0.0);
        frame.viewer_hits = vec![HitTestResult::unresolved(), HitTestResult::new(floor)];
        frame.transient_hits.push(TransientHitTestResult::new(
            TransientInput::new(0.0, 0.0),
            vec![HitTestResult::unresolved(), HitTestResult::new(floor)],
        ));

        assert_eq!(frame.viewer_hit_pose(), Some(floor));
        assert_eq!(frame.transient_hit_pose(), Some(floor));

        frame.viewer_hits = vec![HitTestResult::unresolved()];
        assert!(frame.viewer_hit_pose().is_none());
    }
}
