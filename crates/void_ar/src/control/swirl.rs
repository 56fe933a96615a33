//! One-finger swirl rotation around the model's screen position

use glam::{Quat, Vec2, Vec3};
use void_math::signed_angle_around;

use super::{ArControl, ControlState, RotationSmoother};
use crate::context::{aspect_corrected, ControlInput, XrRenderContext};
use crate::gesture::Gesture;

/// Rotates the model about a fixed axis by the angle the finger sweeps
/// around the model's projected center.
#[derive(Debug, Clone)]
pub struct SwirlControl {
    state: ControlState,
    axis: Vec3,
    rotate_speed: f32,
    prev_pos: Option<Vec2>,
    smoother: RotationSmoother,
}

impl SwirlControl {
    pub fn new(rotate_speed: f32, duration_ms: f32) -> Self {
        Self {
            state: ControlState::new(),
            axis: Vec3::Y,
            rotate_speed,
            prev_pos: None,
            smoother: RotationSmoother::new(duration_ms),
        }
    }

    /// Rotation axis (floor or wall normal)
    #[inline]
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn set_axis(&mut self, axis: Vec3) {
        let axis = axis.normalize_or_zero();
        if axis != Vec3::ZERO {
            self.axis = axis;
        }
    }

    /// Re-sync after the model rotation changed outside this controller
    pub fn update_rotation(&mut self, rotation: Quat) {
        self.smoother.reset(rotation);
    }

    /// Rotation the model is heading toward
    pub fn target_rotation(&self) -> Quat {
        self.smoother.target()
    }

    fn screen_center(ctx: &XrRenderContext<'_>) -> Vec2 {
        let center = ctx.camera.project(ctx.model.transform.position);
        aspect_corrected(center, ctx.aspect())
    }
}

impl ArControl for SwirlControl {
    fn enabled(&self) -> bool {
        self.state.enabled
    }

    fn active(&self) -> bool {
        self.state.active
    }

    fn enable(&mut self) {
        self.state.enabled = true;
    }

    fn disable(&mut self) {
        self.state.disable();
        self.prev_pos = None;
    }

    fn activate(&mut self, ctx: &XrRenderContext<'_>, gesture: Gesture) {
        if !self.state.activate() {
            return;
        }
        log::debug!("Swirl activated by {:?}", gesture);
        self.smoother.reset(ctx.model.transform.rotation);
    }

    fn deactivate(&mut self) {
        self.state.active = false;
        self.prev_pos = None;
    }

    fn set_initial_pos(&mut self, ctx: &XrRenderContext<'_>, coords: &[Vec2]) {
        self.prev_pos = coords.first().map(|p| aspect_corrected(*p, ctx.aspect()));
    }

    fn process(&mut self, ctx: &XrRenderContext<'_>, input: &ControlInput) {
        if !self.state.is_running() {
            return;
        }
        let Some(current) = input.coords.first().map(|p| aspect_corrected(*p, ctx.aspect())) else {
            return;
        };
        let Some(prev) = self.prev_pos.replace(current) else {
            return;
        };

        let center = Self::screen_center(ctx);
        let mut angle = signed_angle_around(center, prev, current) * self.rotate_speed;
        if angle == 0.0 || !angle.is_finite() {
            return;
        }

        // Screen-space counter-clockwise is positive about an axis that
        // points at the viewer.
        if self.axis.dot(ctx.camera.forward()) > 0.0 {
            angle = -angle;
        }
        self.smoother.rotate_by(Quat::from_axis_angle(self.axis, angle));
    }

    fn update(&mut self, ctx: &mut XrRenderContext<'_>, delta_ms: f32) {
        if !self.state.is_running() {
            return;
        }
        ctx.model.transform.rotation = self.smoother.update(delta_ms);
    }
}
