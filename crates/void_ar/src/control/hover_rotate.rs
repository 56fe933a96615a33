//! Free rotation for a model hovering in front of the camera

use glam::{Quat, Vec2};
use void_math::consts::PI;

use super::{ArControl, ControlState, RotationSmoother};
use crate::context::{aspect_corrected, ControlInput, XrRenderContext};
use crate::gesture::Gesture;

/// Horizontal drags turn the model about the camera's up axis, vertical
/// drags about the camera's right axis. A drag across the full screen
/// width turns it by half a revolution.
#[derive(Debug, Clone)]
pub struct HoverRotateControl {
    state: ControlState,
    rotate_speed: f32,
    prev_pos: Option<Vec2>,
    smoother: RotationSmoother,
}

impl HoverRotateControl {
    pub fn new(rotate_speed: f32, duration_ms: f32) -> Self {
        Self {
            state: ControlState::new(),
            rotate_speed,
            prev_pos: None,
            smoother: RotationSmoother::new(duration_ms),
        }
    }

    pub fn update_rotation(&mut self, rotation: Quat) {
        self.smoother.reset(rotation);
    }

    pub fn target_rotation(&self) -> Quat {
        self.smoother.target()
    }
}

impl ArControl for HoverRotateControl {
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
        log::debug!("Hover rotate activated by {:?}", gesture);
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

        let diff = current - prev;
        if diff == Vec2::ZERO {
            return;
        }

        let speed = PI * 0.5 * self.rotate_speed;
        let yaw = Quat::from_axis_angle(ctx.camera.up(), diff.x * speed);
        let pitch = Quat::from_axis_angle(ctx.camera.right(), -diff.y * speed);
        self.smoother.rotate_by(yaw * pitch);
    }

    fn update(&mut self, ctx: &mut XrRenderContext<'_>, delta_ms: f32) {
        if !self.state.is_running() {
            return;
        }
        ctx.model.transform.rotation = self.smoother.update(delta_ms);
    }
}
