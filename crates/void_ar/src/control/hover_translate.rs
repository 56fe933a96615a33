//! Two-finger drag for a model hovering in front of the camera

use glam::{Vec2, Vec3};
use void_math::Plane;

use super::{ArControl, ControlState, PositionSmoother};
use crate::config::ArConfig;
use crate::context::{ControlInput, XrRenderContext};
use crate::gesture::Gesture;
use crate::placement::intersect_drag_plane;

/// Moves the model in a camera-facing plane through its current position,
/// following the midpoint of two fingers.
#[derive(Debug, Clone)]
pub struct HoverTranslateControl {
    state: ControlState,
    max_distance: f32,
    plane: Plane,
    grab_offset: Option<Vec3>,
    smoother: PositionSmoother,
}

impl HoverTranslateControl {
    pub fn new(config: &ArConfig) -> Self {
        Self {
            state: ControlState::new(),
            max_distance: config.max_drag_distance,
            plane: Plane::default(),
            grab_offset: None,
            smoother: PositionSmoother::new(config.translate_duration_ms),
        }
    }

    #[inline]
    pub fn drag_plane(&self) -> &Plane {
        &self.plane
    }

    pub fn target_position(&self) -> Vec3 {
        self.smoother.target()
    }
}

impl ArControl for HoverTranslateControl {
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
        self.grab_offset = None;
    }

    fn activate(&mut self, ctx: &XrRenderContext<'_>, gesture: Gesture) {
        if !self.state.activate() {
            return;
        }
        log::debug!("Hover translate activated by {:?}", gesture);

        let position = ctx.model.transform.position;
        self.plane = Plane::from_point_normal(position, -ctx.camera.forward());
        self.smoother.reset(position);
        self.grab_offset = None;
    }

    fn deactivate(&mut self) {
        self.state.active = false;
        self.grab_offset = None;
    }

    fn set_initial_pos(&mut self, _ctx: &XrRenderContext<'_>, _coords: &[Vec2]) {
        self.grab_offset = None;
    }

    fn process(&mut self, ctx: &XrRenderContext<'_>, input: &ControlInput) {
        if !self.state.is_running() || input.finger_count() < 2 {
            return;
        }
        let Some(center) = input.center() else {
            return;
        };
        let Some(point) = intersect_drag_plane(ctx.camera, center, &self.plane, self.max_distance) else {
            return;
        };

        let committed = self.smoother.target();
        let offset = *self.grab_offset.get_or_insert_with(|| committed - point);
        self.smoother.move_to(point + offset);
    }

    fn update(&mut self, ctx: &mut XrRenderContext<'_>, delta_ms: f32) {
        if !self.state.is_running() {
            return;
        }
        ctx.model.transform.position = self.smoother.update(delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ArModel, ScreenSize};
    use approx::assert_relative_eq;
    use void_xr::{XrCamera, XrFrame};

    #[test]
    fn test_midpoint_drag_moves_in_view_plane() {
        let mut model = ArModel::default();
        model.transform.position = Vec3::new(0.0, 0.0, -1.0);
        let camera = XrCamera::default();
        let frame = XrFrame::new(0.0);
        let mut ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);

        let mut control = HoverTranslateControl::new(&ArConfig::default());
        control.activate(&ctx, Gesture::TWO_FINGER_HORIZONTAL);

        let start = vec![Vec2::new(-0.1, 0.0), Vec2::new(0.1, 0.0)];
        control.process(&ctx, &ControlInput::new(start, None));
        let moved = vec![Vec2::new(0.2, 0.0), Vec2::new(0.4, 0.0)];
        control.process(&ctx, &ControlInput::new(moved, None));
        control.update(&mut ctx, 1000.0);

        let position = model.transform.position;
        assert!(position.x > 0.0);
        assert_relative_eq!(position.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(position.z, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_single_finger_ignored() {
        let mut model = ArModel::default();
        model.transform.position = Vec3::new(0.0, 0.0, -1.0);
        let camera = XrCamera::default();
        let frame = XrFrame::new(0.0);
        let ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);

        let mut control = HoverTranslateControl::new(&ArConfig::default());
        control.activate(&ctx, Gesture::TWO_FINGER);
        control.process(&ctx, &ControlInput::new(vec![Vec2::new(0.5, 0.5)], None));
        assert_eq!(control.target_position(), Vec3::new(0.0, 0.0, -1.0));
    }
}
