//! Dragging the model along the floor

use glam::{Vec2, Vec3};
use void_math::Plane;

use super::{ArControl, ControlState, HoverLift};
use crate::config::ArConfig;
use crate::context::{ControlInput, XrRenderContext};
use crate::gesture::Gesture;
use crate::placement::{intersect_drag_plane, is_floor_hit, reposition_floor_plane};

/// Moves the model across a horizontal drag plane.
///
/// Live floor hits under the finger win; they move the drag plane when
/// the floor height changes by more than the hysteresis threshold. Without
/// a usable hit the finger ray is intersected with the last drag plane.
#[derive(Debug, Clone)]
pub struct FloorTranslateControl {
    state: ControlState,
    floor_threshold: f32,
    hysteresis: f32,
    max_distance: f32,
    plane: Plane,
    floor_position: Vec3,
    grab_offset: Option<Vec3>,
    lift: HoverLift,
}

impl FloorTranslateControl {
    pub fn new(config: &ArConfig) -> Self {
        Self {
            state: ControlState::new(),
            floor_threshold: config.floor_threshold,
            hysteresis: config.plane_hysteresis,
            max_distance: config.max_drag_distance,
            plane: Plane::horizontal(0.0),
            floor_position: Vec3::ZERO,
            grab_offset: None,
            lift: HoverLift::new(config),
        }
    }

    /// Rest the model at `position` and put the drag plane there
    pub fn init_floor_position(&mut self, position: Vec3) {
        self.floor_position = position;
        self.plane = Plane::horizontal(position.y);
    }

    /// Where the model rests on the floor
    #[inline]
    pub fn floor_position(&self) -> Vec3 {
        self.floor_position
    }

    #[inline]
    pub fn drag_plane(&self) -> &Plane {
        &self.plane
    }

    #[inline]
    pub fn lift(&self) -> &HoverLift {
        &self.lift
    }

    fn target_point(&mut self, ctx: &XrRenderContext<'_>, input: &ControlInput) -> Option<Vec3> {
        if let Some(hit) = input.hit_pose.filter(|hit| is_floor_hit(hit, self.floor_threshold)) {
            let position = hit.position();
            reposition_floor_plane(&mut self.plane, position.y, self.hysteresis);
            return Some(Vec3::new(position.x, self.plane.height(), position.z));
        }

        let finger = input.coords.first()?;
        intersect_drag_plane(ctx.camera, *finger, &self.plane, self.max_distance)
    }
}

impl ArControl for FloorTranslateControl {
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

    fn activate(&mut self, _ctx: &XrRenderContext<'_>, gesture: Gesture) {
        if !self.state.activate() {
            return;
        }
        log::debug!("Floor translate activated by {:?}", gesture);
        self.grab_offset = None;
        self.lift.start();
    }

    fn deactivate(&mut self) {
        if self.state.active {
            self.lift.release();
        }
        self.state.active = false;
        self.grab_offset = None;
    }

    fn set_initial_pos(&mut self, _ctx: &XrRenderContext<'_>, _coords: &[Vec2]) {
        self.grab_offset = None;
    }

    fn process(&mut self, ctx: &XrRenderContext<'_>, input: &ControlInput) {
        if !self.state.is_running() {
            return;
        }
        let Some(point) = self.target_point(ctx, input) else {
            return;
        };

        // Keep the spot under the finger fixed relative to the model.
        let resting = self.floor_position;
        let offset = *self
            .grab_offset
            .get_or_insert_with(|| Vec3::new(resting.x - point.x, 0.0, resting.z - point.z));

        self.floor_position = Vec3::new(point.x + offset.x, self.plane.height(), point.z + offset.z);
    }

    fn update(&mut self, ctx: &mut XrRenderContext<'_>, delta_ms: f32) {
        // The bounce keeps running after release until the model lands.
        if !self.state.enabled || (!self.state.active && !self.lift.is_animating()) {
            return;
        }
        let offset = self.lift.update(delta_ms);
        ctx.model.transform.position = self.floor_position + Vec3::Y * offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ArModel, ScreenSize};
    use approx::assert_relative_eq;
    use glam::Quat;
    use void_xr::{HitPose, XrCamera, XrFrame};

    fn camera() -> XrCamera {
        // 1.5m up, looking 45 degrees down along -Z.
        let rotation = Quat::from_rotation_x(-45f32.to_radians());
        XrCamera::perspective(Vec3::new(0.0, 1.5, 0.0), rotation, 60f32.to_radians(), 1.0)
    }

    fn floor_hit(x: f32, y: f32, z: f32) -> HitPose {
        HitPose::from_position_normal(Vec3::new(x, y, z), Vec3::Y)
    }

    #[test]
    fn test_follows_floor_hits_with_grab_offset() {
        let mut model = ArModel::default();
        let camera = camera();
        let frame = XrFrame::new(0.0);
        let ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);

        let mut control = FloorTranslateControl::new(&ArConfig::default());
        control.init_floor_position(Vec3::new(0.0, 0.0, -1.5));
        control.activate(&ctx, Gesture::ONE_FINGER_HORIZONTAL);

        let coords = vec![Vec2::ZERO];
        control.process(&ctx, &ControlInput::new(coords.clone(), Some(floor_hit(0.1, 0.0, -1.4))));
        assert_relative_eq!(control.floor_position().x, 0.0, epsilon = 1e-6);

        control.process(&ctx, &ControlInput::new(coords, Some(floor_hit(0.6, 0.0, -1.9))));
        assert_relative_eq!(control.floor_position().x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(control.floor_position().z, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_floor_height_hysteresis() {
        let mut model = ArModel::default();
        let camera = camera();
        let frame = XrFrame::new(0.0);
        let ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);

        let mut control = FloorTranslateControl::new(&ArConfig::default());
        control.init_floor_position(Vec3::new(0.0, 1.0, -1.5));
        control.activate(&ctx, Gesture::ONE_FINGER);

        let coords = vec![Vec2::ZERO];
        control.process(&ctx, &ControlInput::new(coords.clone(), Some(floor_hit(0.0, 1.05, -1.5))));
        assert_eq!(control.drag_plane().height(), 1.0);
        assert_eq!(control.floor_position().y, 1.0);

        control.process(&ctx, &ControlInput::new(coords, Some(floor_hit(0.0, 1.2, -1.5))));
        assert_eq!(control.drag_plane().height(), 1.2);
        assert_eq!(control.floor_position().y, 1.2);
    }

    #[test]
    fn test_slanted_hit_falls_back_to_drag_plane() {
        let mut model = ArModel::default();
        let camera = camera();
        let frame = XrFrame::new(0.0);
        let ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);

        let mut control = FloorTranslateControl::new(&ArConfig::default());
        control.init_floor_position(Vec3::new(0.0, 0.0, -1.5));
        control.activate(&ctx, Gesture::ONE_FINGER);

        let slanted = HitPose::from_position_normal(Vec3::new(5.0, 3.0, -5.0), Vec3::new(1.0, 1.0, 0.0));
        control.process(&ctx, &ControlInput::new(vec![Vec2::ZERO], Some(slanted)));
        control.process(&ctx, &ControlInput::new(vec![Vec2::new(0.0, -0.2)], Some(slanted)));

        assert_eq!(control.drag_plane().height(), 0.0);
        let position = control.floor_position();
        assert_eq!(position.y, 0.0);
        assert!(position.z > -1.5, "finger moved toward the viewer: {:?}", position);
    }

    #[test]
    fn test_release_bounces_model_down() {
        let mut model = ArModel::default();
        let camera = camera();
        let frame = XrFrame::new(0.0);
        let config = ArConfig::default();

        let mut control = FloorTranslateControl::new(&config);
        control.init_floor_position(Vec3::new(0.0, 0.0, -1.5));
        {
            let mut ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);
            control.activate(&ctx, Gesture::ONE_FINGER);
            control.update(&mut ctx, config.lift_duration_ms);
        }
        assert!(model.transform.position.y > 0.0);

        control.deactivate();
        let mut ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);
        control.update(&mut ctx, config.bounce_duration_ms * 2.0);
        assert_eq!(model.transform.position.y, 0.0);

        // Settled: nothing moves the model anymore.
        model.transform.position.y = 0.5;
        let mut ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);
        control.update(&mut ctx, 16.0);
        assert_eq!(model.transform.position.y, 0.5);
    }
}
